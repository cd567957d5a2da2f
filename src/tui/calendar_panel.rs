use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use calendar_brief::{
    app::{AppState, Focus},
    ui::month_view::{self, CellView},
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {}", layout.title), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(
            layout
                .headers
                .iter()
                .map(|day| Span::styled(month_view::header_label(*day), Style::default().fg(app.theme.weekday_header)))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let day_spans: Vec<Span> = week
            .days
            .iter()
            .map(|cell| Span::styled(format!(" {:>2}  ", cell.label), cell_style(app, cell)))
            .collect();
        lines.push(Line::from(day_spans));
    }

    let border_style = if app.focus == Focus::Calendar && !app.research.is_open() {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default()
    };

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    f.render_widget(content, area);
}

fn cell_style(app: &AppState, cell: &CellView) -> Style {
    let mut style = Style::default();

    if !cell.in_current_month {
        return style.fg(app.theme.inactive_day);
    }

    if cell.is_selected {
        style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD);
    } else if cell.is_today {
        style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
    }

    if cell.is_focused && app.focus == Focus::Calendar {
        style = style.add_modifier(Modifier::REVERSED);
    }

    style
}
