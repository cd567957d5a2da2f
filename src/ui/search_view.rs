use chrono::NaiveDate;

use crate::calendar::Meeting;
use crate::ui::text::ClockFormat;

pub const SEARCHING_TEXT: &str = "Searching...";
pub const NO_MATCHES_TEXT: &str = "No meetings match this keyword";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// Keyword is being typed.
    Editing,
    /// Waiting on the request tagged `seq`.
    Searching { seq: u64 },
    Results(Vec<Meeting>),
    Failed(String),
}

/// Keyword search popup: a query buffer plus whatever the last submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOverlay {
    pub query: String,
    pub phase: SearchPhase,
    pub cursor: usize,
}

/// One result row as shown in the popup.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHitView {
    pub title: String,
    pub when: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_focused: bool,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Editing,
            cursor: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, SearchPhase::Editing)
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn edit(&mut self) {
        self.phase = SearchPhase::Editing;
        self.cursor = 0;
    }

    /// Keyword to send, if there is one.
    pub fn keyword(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn begin(&mut self, seq: u64) {
        self.phase = SearchPhase::Searching { seq };
        self.cursor = 0;
    }

    pub fn is_waiting_on(&self, seq: u64) -> bool {
        self.phase == SearchPhase::Searching { seq }
    }

    pub fn hits(&self) -> &[Meeting] {
        match &self.phase {
            SearchPhase::Results(hits) => hits,
            _ => &[],
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let count = self.hits().len();
        if count > 0 {
            let target = self.cursor as i64 + delta as i64;
            self.cursor = target.clamp(0, count as i64 - 1) as usize;
        }
    }

    pub fn focused_hit(&self) -> Option<&Meeting> {
        self.hits().get(self.cursor)
    }

    pub fn hit_views(&self, clock: ClockFormat) -> Vec<SearchHitView> {
        self.hits()
            .iter()
            .enumerate()
            .map(|(index, meeting)| SearchHitView {
                title: meeting.title.clone(),
                when: meeting
                    .start_time
                    .as_ref()
                    .map(|start| format!("{} {}", start.format("%a %b %-d, %Y"), clock.time(start))),
                date: meeting.start_time.map(|start| start.date_naive()),
                is_focused: index == self.cursor,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn meeting(title: &str) -> Meeting {
        Meeting {
            id: None,
            title: title.to_string(),
            attendee_names: vec![],
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            research_summary: None,
            preparation_questions: None,
            attendees: vec![],
        }
    }

    #[test]
    fn blank_query_has_no_keyword() {
        let mut search = SearchOverlay::new();
        search.push(' ');

        assert_eq!(search.keyword(), None);
        search.push('q');
        assert_eq!(search.keyword(), Some("q"));
        search.pop();
        search.pop();
        assert_eq!(search.query, "");
    }

    #[test]
    fn only_the_latest_submission_is_awaited() {
        let mut search = SearchOverlay::new();
        search.begin(1);
        search.begin(2);

        assert!(!search.is_waiting_on(1));
        assert!(search.is_waiting_on(2));
    }

    #[test]
    fn cursor_stays_within_hits() {
        let mut search = SearchOverlay::new();
        search.phase = SearchPhase::Results(vec![meeting("One"), meeting("Two")]);

        search.move_cursor(4);
        assert_eq!(search.focused_hit().map(|m| m.title.as_str()), Some("Two"));
        search.move_cursor(-9);
        assert_eq!(search.cursor, 0);
    }

    #[test]
    fn hit_views_carry_date_and_focus() {
        let mut search = SearchOverlay::new();
        let mut timed = meeting("Roadmap");
        timed.start_time = Local.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).single();
        search.phase = SearchPhase::Results(vec![meeting("Untimed"), timed]);
        search.move_cursor(1);

        let views = search.hit_views(ClockFormat::TwentyFourHour);

        assert_eq!(views[0].when, None);
        assert!(!views[0].is_focused);
        assert_eq!(views[1].when.as_deref(), Some("Thu May 2, 2024 10:00"));
        assert_eq!(views[1].date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert!(views[1].is_focused);
    }
}
