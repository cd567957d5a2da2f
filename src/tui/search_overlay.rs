use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use calendar_brief::{
    app::AppState,
    ui::search_view::{SearchOverlay, SearchPhase, NO_MATCHES_TEXT, SEARCHING_TEXT},
};

pub fn search_lines(search: &SearchOverlay, app: &AppState) -> Vec<Line<'static>> {
    let cursor = if search.is_editing() { "_" } else { "" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Keyword: ", Style::default().fg(app.theme.research_heading).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}{}", search.query, cursor)),
        ]),
        Line::from(""),
    ];

    match &search.phase {
        SearchPhase::Editing => {
            lines.push(Line::from("Enter = Search | Esc = Cancel"));
        }
        SearchPhase::Searching { .. } => {
            lines.push(Line::from(Span::styled(SEARCHING_TEXT, Style::default().fg(app.theme.loading))));
        }
        SearchPhase::Failed(message) => {
            lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(app.theme.error))));
        }
        SearchPhase::Results(hits) if hits.is_empty() => {
            lines.push(Line::from(NO_MATCHES_TEXT));
        }
        SearchPhase::Results(_) => {
            for hit in search.hit_views(app.clock) {
                let mut style = Style::default().fg(app.theme.meeting_title);
                if hit.is_focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                lines.push(Line::from(Span::styled(hit.title, style)));
                let when = hit.when.unwrap_or_else(|| "No start time".to_string());
                lines.push(Line::from(format!("  📅 {}", when)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from("j/k = Move | Enter = Go to day | / = New search | Esc = Close"));
        }
    }

    lines
}

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(search) = &app.search else {
        return;
    };

    let area = f.size();
    let panel_width = (area.width as f32 * 0.6) as u16;
    let panel_height = (area.height as f32 * 0.6) as u16;
    let panel_area = Rect {
        x: (area.width.saturating_sub(panel_width)) / 2,
        y: (area.height.saturating_sub(panel_height)) / 2,
        width: panel_width,
        height: panel_height,
    };

    f.render_widget(Clear, panel_area);

    let paragraph = Paragraph::new(search_lines(search, app))
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Search meetings ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, panel_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_brief::config::Config;
    use chrono::NaiveDate;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn app() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &Config::default())
    }

    #[test]
    fn editing_shows_query_with_cursor() {
        let mut search = SearchOverlay::new();
        search.push('q');
        search.push('3');

        let lines = text(&search_lines(&search, &app()));

        assert_eq!(lines[0], "Keyword: q3_");
    }

    #[test]
    fn empty_results_say_so() {
        let mut search = SearchOverlay::new();
        search.phase = SearchPhase::Results(vec![]);

        let lines = text(&search_lines(&search, &app()));

        assert!(lines.contains(&NO_MATCHES_TEXT.to_string()));
    }
}
