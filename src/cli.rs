use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
    time::Duration,
};

use chrono::{Local, NaiveDate};

use calendar_brief::{
    calendar::Meeting,
    config::Config,
    service::{MeetingsApi, MeetingsClient},
    ui::text::ClockFormat,
};

pub const USAGE: &str = "Usage: calendar-brief [--base-url URL] [--agenda [YYYY/MM/DD]]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Tui,
    Agenda(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub base_url: Option<String>,
    pub mode: CliMode,
}

pub fn parse_cli_args(args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut base_url = None;
    let mut agenda_date = None;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                let url = args
                    .next()
                    .filter(|v| !v.starts_with("--"))
                    .ok_or_else(|| "--base-url requires a URL".to_string())?;
                base_url = Some(url);
            }
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => Local::now().date_naive(),
                };
                agenda_date = Some(target_date);
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let mode = match agenda_date {
        Some(date) => CliMode::Agenda(date),
        None => CliMode::Tui,
    };
    Ok(CliOptions { base_url, mode })
}

pub async fn run_agenda_mode(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let client = MeetingsClient::new(config.service.base_url.clone())
        .with_timeout(Duration::from_secs(config.service.request_timeout_secs))?;

    let mut meetings = match client.meetings_for_date(date).await {
        Ok(list) => list,
        Err(e) => {
            tracing::error!("Agenda fetch for {} failed: {}", date, e);
            eprintln!("Could not load meetings: {}. The meeting service may be unavailable.", e);
            return Ok(());
        }
    };

    sort_for_agenda(&mut meetings);
    let agenda = format_agenda_text(date, &meetings, config.clock());
    display_with_pager(&agenda)?;
    Ok(())
}

/// Timed meetings in start order, untimed ones after them.
fn sort_for_agenda(meetings: &mut [Meeting]) {
    meetings.sort_by_key(|meeting| (meeting.start_time.is_none(), meeting.start_time));
}

fn format_agenda_text(date: NaiveDate, meetings: &[Meeting], clock: ClockFormat) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Meetings - {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if meetings.is_empty() {
        lines.push("No meetings found for this date".to_string());
    } else {
        for meeting in meetings {
            lines.push(format!("- {}", build_agenda_line(meeting, clock)));
            if !meeting.attendee_names.is_empty() {
                lines.push(format!("  {:<13} with {}", "", meeting.attendee_line()));
            }
        }
    }

    lines.join("\n")
}

fn build_agenda_line(meeting: &Meeting, clock: ClockFormat) -> String {
    let time_label = match (&meeting.start_time, &meeting.end_time) {
        (Some(start), Some(end)) => format!("{}-{}", clock.time(start), clock.time(end)),
        (Some(start), None) => clock.time(start),
        _ => "Time TBD".to_string(),
    };

    let mut line = format!("{:<13} {}", time_label, meeting.title);
    if let Some(location) = &meeting.location
        && !location.is_empty()
    {
        line.push_str(&format!(" @ {}", location));
    }
    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}
