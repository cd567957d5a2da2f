use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use calendar_brief::{
    app::{AppState, Focus},
    calendar::Meeting,
    panel::PanelState,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let heading = match app.selection.selected() {
        Some(date) => format!(" Meetings for {} ", date.format("%A, %B %-d, %Y")),
        None => " Meetings ".to_string(),
    };

    let lines = panel_lines(app);

    let border_style = if app.focus == Focus::Meetings && !app.research.is_open() {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default()
    };

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(heading).border_style(border_style))
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);
}

fn panel_lines(app: &AppState) -> Vec<Line<'static>> {
    match app.panel.state() {
        PanelState::Idle => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a day to see its meetings.",
                Style::default().fg(app.theme.inactive_day),
            )),
        ],
        PanelState::Loading => {
            let text = app.panel.loading().map(|l| l.text()).unwrap_or_default();
            vec![
                Line::from(""),
                Line::from(Span::styled(text, Style::default().fg(app.theme.loading))),
            ]
        }
        PanelState::Empty => vec![
            Line::from(""),
            Line::from("No meetings scheduled for this day."),
        ],
        PanelState::Error(message) => vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(app.theme.error))),
            Line::from(""),
            Line::from("Press R to retry."),
        ],
        PanelState::Success(meetings) => meetings
            .iter()
            .enumerate()
            .flat_map(|(index, meeting)| {
                let focused = app.focus == Focus::Meetings && index == app.meeting_index;
                meeting_lines(app, meeting, focused)
            })
            .collect(),
    }
}

fn meeting_lines(app: &AppState, meeting: &Meeting, focused: bool) -> Vec<Line<'static>> {
    let mut title_style = Style::default().fg(app.theme.meeting_title).add_modifier(Modifier::BOLD);
    if focused {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let mut lines = vec![Line::from(Span::styled(meeting.title.clone(), title_style))];

    if let Some(start) = &meeting.start_time {
        let mut when = app.clock.time(start);
        if let Some(end) = &meeting.end_time {
            when = format!("{} - {}", when, app.clock.time(end));
        }
        lines.push(Line::from(format!("  🕒 {}", when)));
    }

    if !meeting.attendee_names.is_empty() {
        lines.push(Line::from(format!("  👥 {}", meeting.attendee_line())));
    }

    if let Some(location) = &meeting.location {
        lines.push(Line::from(format!("  📍 {}", location)));
    }

    if meeting.has_research() {
        lines.push(Line::from(Span::styled(
            "  🔎 Research available (r)",
            Style::default().fg(app.theme.research_heading),
        )));
    }

    lines.push(Line::from(""));
    lines
}
