use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use calendar_brief::{
    app::{AppState, ServiceStatus},
    panel::StatusKind,
    ui::month_view::CELL_WIDTH,
};
use crate::tui::{calendar_panel, meeting_list, research_overlay, search_overlay};

pub struct ScreenAreas {
    pub title: Rect,
    pub calendar: Rect,
    pub meetings: Rect,
    pub status: Rect,
}

pub fn screen_areas(size: Rect) -> ScreenAreas {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CELL_WIDTH * 7 + 2),
            Constraint::Min(0),
        ])
        .split(main_chunks[1]);

    ScreenAreas {
        title: main_chunks[0],
        calendar: content_chunks[0],
        meetings: content_chunks[1],
        status: main_chunks[2],
    }
}

/// Inner area of the calendar block, used for both drawing and mouse hit-testing.
pub fn calendar_inner(size: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(screen_areas(size).calendar)
}

pub fn ui(f: &mut Frame, app: &AppState) {
    let areas = screen_areas(f.size());

    let title = Paragraph::new("calendar-brief - Meeting Research")
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, areas.title);

    calendar_panel::render(f, app, areas.calendar);
    meeting_list::render(f, app, areas.meetings);
    render_status_bar(f, app, areas.status);

    if app.research.is_open() {
        research_overlay::render(f, app);
    }
    if app.search.is_some() {
        search_overlay::render(f, app);
    }
}

fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match app.panel.status() {
        Some(message) => {
            let color = match message.kind {
                StatusKind::Success => app.theme.success,
                StatusKind::Error => app.theme.error,
            };
            Line::from(Span::styled(
                message.text.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(vec![
            Span::raw(format!("Service: {} | ", service_label(&app.service_status))),
            Span::raw("[ ] = Month | Enter = Select | n = Next meeting | / = Search | r = Research | q = Quit"),
        ]),
    };

    let status = Paragraph::new(line)
        .style(Style::default().fg(app.theme.status_bar))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn service_label(status: &ServiceStatus) -> String {
    match status {
        ServiceStatus::Unknown => "checking".to_string(),
        ServiceStatus::Online => "online".to_string(),
        ServiceStatus::Degraded => "online (research unavailable)".to_string(),
        ServiceStatus::Offline(reason) => format!("offline ({})", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_column_fits_seven_days() {
        let areas = screen_areas(Rect { x: 0, y: 0, width: 100, height: 30 });

        assert_eq!(areas.calendar.width, 37);
        assert_eq!(calendar_inner(Rect { x: 0, y: 0, width: 100, height: 30 }).x, 1);
    }

    #[test]
    fn offline_label_names_reason() {
        assert_eq!(
            service_label(&ServiceStatus::Offline("connection refused".to_string())),
            "offline (connection refused)"
        );
    }
}
