use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use calendar_brief::{app::AppState, ui::research_view::ResearchDetail};

pub fn detail_lines(detail: &ResearchDetail, heading: Style, title: Style) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(detail.header.title.clone(), title)),
        Line::from(""),
    ];

    if let Some(when) = &detail.header.when {
        lines.push(Line::from(format!("📅 {}", when)));
    }
    if let Some(location) = &detail.header.location {
        lines.push(Line::from(format!("📍 {}", location)));
    }

    if !detail.attendees.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("👥 Attendees:", heading)));
        for attendee in &detail.attendees {
            if attendee.facts.is_empty() {
                lines.push(Line::from(format!("   • {}", attendee.name)));
            } else {
                lines.push(Line::from(format!("   • {} ({})", attendee.name, attendee.facts.join(", "))));
            }
            if let Some(research) = &attendee.research {
                lines.push(Line::from(format!("     {}", research)));
            }
        }
    }

    push_section(&mut lines, "🔎 Meeting analysis:", detail.analysis.as_deref(), heading);
    push_section(&mut lines, "❓ Preparation questions:", detail.preparation.as_deref(), heading);
    push_section(&mut lines, "📝 Description:", detail.description.as_deref(), heading);

    lines
}

fn push_section(lines: &mut Vec<Line<'static>>, label: &'static str, body: Option<&str>, heading: Style) {
    let Some(body) = body else { return };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(label, heading)));
    lines.extend(body.lines().map(|l| Line::from(l.to_string())));
}

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(detail) = app.research.detail() else {
        return;
    };

    let area = f.size();
    let panel_width = (area.width as f32 * 0.7) as u16;
    let panel_height = (area.height as f32 * 0.8) as u16;
    let panel_area = Rect {
        x: (area.width.saturating_sub(panel_width)) / 2,
        y: (area.height.saturating_sub(panel_height)) / 2,
        width: panel_width,
        height: panel_height,
    };

    f.render_widget(Clear, panel_area);

    let heading = Style::default().fg(app.theme.research_heading).add_modifier(Modifier::BOLD);
    let title = Style::default().fg(app.theme.meeting_title).add_modifier(Modifier::BOLD);
    let mut lines = detail_lines(detail, heading, title);

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("q", Style::default().fg(app.theme.error)),
        Span::raw("/"),
        Span::styled("Esc", Style::default().fg(app.theme.error)),
        Span::raw(" = Close"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Research ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, panel_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_brief::ui::research_view::{AttendeeDetail, DetailHeader};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn detail() -> ResearchDetail {
        ResearchDetail {
            header: DetailHeader { title: "Sync".to_string(), when: None, location: None },
            attendees: vec![],
            analysis: None,
            preparation: None,
            description: None,
        }
    }

    #[test]
    fn absent_sections_leave_no_placeholder() {
        let lines = text(&detail_lines(&detail(), Style::default(), Style::default()));

        assert_eq!(lines, vec!["Sync".to_string(), String::new()]);
    }

    #[test]
    fn attendee_facts_follow_name() {
        let mut detail = detail();
        detail.attendees.push(AttendeeDetail {
            name: "Ada".to_string(),
            facts: vec!["ada@example.com".to_string(), "Analytical".to_string()],
            research: Some("Engineer...".to_string()),
        });
        detail.analysis = Some("Discuss roadmap...".to_string());

        let lines = text(&detail_lines(&detail, Style::default(), Style::default()));

        assert!(lines.contains(&"   • Ada (ada@example.com, Analytical)".to_string()));
        assert!(lines.contains(&"     Engineer...".to_string()));
        assert!(lines.contains(&"🔎 Meeting analysis:".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("❓")));
    }
}
