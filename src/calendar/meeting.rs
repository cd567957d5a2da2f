use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A meeting in canonical shape. Field aliases from the service are resolved
/// before a `Meeting` is built (see `service::wire`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Option<String>,
    pub title: String,
    pub attendee_names: Vec<String>,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub research_summary: Option<String>,
    pub preparation_questions: Option<String>,
    pub attendees: Vec<Attendee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub research_summary: Option<String>,
    pub found_info: bool,
}

impl Meeting {
    pub fn attendee_line(&self) -> String {
        self.attendee_names.join(", ")
    }

    pub fn has_research(&self) -> bool {
        self.research_summary.is_some()
            || self.preparation_questions.is_some()
            || self.attendees.iter().any(|a| a.research_summary.is_some())
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meeting(names: &[&str]) -> Meeting {
        Meeting {
            id: None,
            title: "Sync".to_string(),
            attendee_names: names.iter().map(|n| n.to_string()).collect(),
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
    fn attendee_line_joins_names_in_order() {
        assert_eq!(meeting(&["A", "B"]).attendee_line(), "A, B");
    }

    #[test]
    fn meeting_without_research_reports_none() {
        assert!(!meeting(&["A"]).has_research());
    }

    #[test]
    fn attendee_research_counts_as_research() {
        let mut m = meeting(&["A"]);
        m.attendees.push(Attendee {
            name: "A".to_string(),
            email: None,
            company: None,
            title: None,
            research_summary: Some("Founder".to_string()),
            found_info: true,
        });

        assert!(m.has_research());
    }

    #[test]
    fn duration_needs_both_ends() {
        let mut m = meeting(&[]);
        let start = Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        m.start_time = Some(start);
        assert_eq!(m.duration_minutes(), None);

        m.end_time = Some(start + chrono::Duration::minutes(45));
        assert_eq!(m.duration_minutes(), Some(45));
    }
}
