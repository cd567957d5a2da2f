use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use calendar_brief::{
    app::{AppEvent, AppState, Command},
    config::Config,
    input::normal_mode,
    service::{
        fetch::{spawn_health_check, spawn_meeting_search, spawn_meetings_fetch, spawn_next_meeting_lookup},
        MeetingsApi, MeetingsClient,
    },
    ui::month_view,
};
use crate::tui::presentation::{calendar_inner, ui};

const INPUT_POLL: Duration = Duration::from_millis(250);

enum Incoming {
    Terminal(TermEvent),
    App(AppEvent),
    Deadline,
}

pub async fn run_tui(config: Config) -> anyhow::Result<()> {
    let client = MeetingsClient::new(config.service.base_url.clone())
        .with_timeout(Duration::from_secs(config.service.request_timeout_secs))?;
    tracing::info!("Using meeting service at {}", client.base_url());
    let api: Arc<dyn MeetingsApi> = Arc::new(client);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(Local::now().date_naive(), &config);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    spawn_health_check(api.clone(), events_tx.clone());
    let input_rx = spawn_input_reader();

    let res = run_app(&mut terminal, &mut app, api, events_tx, events_rx, input_rx).await;

    app.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("Session ended with error: {:?}", err);
    }
    res
}

/// Reads terminal events on a blocking thread so the session loop can await
/// fetch results and timer deadlines alongside them.
fn spawn_input_reader() -> UnboundedReceiver<TermEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Failed to poll terminal: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: Arc<dyn MeetingsApi>,
    events_tx: UnboundedSender<AppEvent>,
    mut events_rx: UnboundedReceiver<AppEvent>,
    mut input_rx: UnboundedReceiver<TermEvent>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let incoming = tokio::select! {
            maybe = input_rx.recv() => match maybe {
                Some(ev) => Incoming::Terminal(ev),
                None => {
                    tracing::warn!("Terminal input closed");
                    return Ok(());
                }
            },
            Some(ev) = events_rx.recv() => Incoming::App(ev),
            _ = sleep_until(app.next_deadline()) => Incoming::Deadline,
        };

        let event = match incoming {
            Incoming::Terminal(ev) => translate_terminal_event(ev, app, terminal.size()?),
            Incoming::App(ev) => Some(ev),
            Incoming::Deadline => Some(AppEvent::Tick),
        };

        let Some(event) = event else { continue };

        for command in app.dispatch(event, Instant::now()) {
            match command {
                Command::FetchMeetings(ticket) => {
                    spawn_meetings_fetch(api.clone(), ticket, events_tx.clone());
                }
                Command::FetchNextMeeting(seq) => {
                    spawn_next_meeting_lookup(api.clone(), seq, events_tx.clone());
                }
                Command::SearchMeetings { seq, keyword } => {
                    spawn_meeting_search(api.clone(), seq, keyword, events_tx.clone());
                }
                Command::Quit => return Ok(()),
            }
        }
    }
}

fn translate_terminal_event(ev: TermEvent, app: &AppState, size: ratatui::layout::Rect) -> Option<AppEvent> {
    match ev {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => normal_mode::handle_key(key.code, app),
        TermEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            if app.research.is_open() || app.search.is_some() {
                return None;
            }
            month_view::handle_at(app, calendar_inner(size), mouse.column, mouse.row)
                .map(AppEvent::DayClicked)
        }
        _ => None,
    }
}
