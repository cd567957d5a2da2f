//! On-demand research detail for a single meeting.
//!
//! Built only from data already loaded with the meeting list. Sections whose
//! data is missing are left out entirely.

use crate::calendar::{Attendee, Meeting};
use crate::ui::text::{self, ClockFormat};

pub const ATTENDEE_EXCERPT_CHARS: usize = 200;
pub const ANALYSIS_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchDetail {
    pub header: DetailHeader,
    pub attendees: Vec<AttendeeDetail>,
    pub analysis: Option<String>,
    pub preparation: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailHeader {
    pub title: String,
    pub when: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeDetail {
    pub name: String,
    pub facts: Vec<String>,
    pub research: Option<String>,
}

pub fn render(meeting: &Meeting, clock: ClockFormat) -> ResearchDetail {
    ResearchDetail {
        header: header(meeting, clock),
        attendees: meeting.attendees.iter().map(attendee).collect(),
        analysis: meeting
            .research_summary
            .as_deref()
            .map(|s| text::excerpt(s, ANALYSIS_EXCERPT_CHARS)),
        preparation: meeting
            .preparation_questions
            .as_deref()
            .map(|s| text::excerpt(s, ANALYSIS_EXCERPT_CHARS)),
        description: meeting
            .description
            .as_deref()
            .map(text::plain_text)
            .filter(|d| !d.is_empty()),
    }
}

fn header(meeting: &Meeting, clock: ClockFormat) -> DetailHeader {
    let when = meeting.start_time.map(|start| match meeting.end_time {
        Some(end) if end.date_naive() == start.date_naive() => {
            format!("{} - {}", clock.date_time(&start), clock.time(&end))
        }
        _ => clock.date_time(&start),
    });

    DetailHeader {
        title: meeting.title.clone(),
        when,
        location: meeting.location.clone(),
    }
}

fn attendee(attendee: &Attendee) -> AttendeeDetail {
    let facts = [&attendee.email, &attendee.company, &attendee.title]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    AttendeeDetail {
        name: attendee.name.clone(),
        facts,
        research: attendee
            .research_summary
            .as_deref()
            .map(|s| text::excerpt(s, ATTENDEE_EXCERPT_CHARS)),
    }
}

/// Overlay slot: at most one meeting's detail is open.
#[derive(Debug, Clone, Default)]
pub struct ResearchOverlay {
    open: Option<(usize, ResearchDetail)>,
}

impl ResearchOverlay {
    /// Opens the detail for meeting `index`, replacing whatever was open.
    pub fn open(&mut self, index: usize, detail: ResearchDetail) {
        if let Some((previous, _)) = &self.open
            && *previous != index
        {
            tracing::debug!("Research view switching from meeting {} to {}", previous, index);
        }
        self.open = Some((index, detail));
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn meeting_index(&self) -> Option<usize> {
        self.open.as_ref().map(|(index, _)| *index)
    }

    pub fn detail(&self) -> Option<&ResearchDetail> {
        self.open.as_ref().map(|(_, detail)| detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text::ELLIPSIS;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn bare_meeting() -> Meeting {
        Meeting {
            id: Some("m1".to_string()),
            title: "Quarterly review".to_string(),
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

    fn researched_attendee(summary: &str) -> Attendee {
        Attendee {
            name: "Grace Hopper".to_string(),
            email: Some("grace@example.com".to_string()),
            company: None,
            title: Some("Rear Admiral".to_string()),
            research_summary: Some(summary.to_string()),
            found_info: true,
        }
    }

    #[test]
    fn bare_meeting_renders_only_title() {
        let detail = render(&bare_meeting(), ClockFormat::TwentyFourHour);

        assert_eq!(
            detail,
            ResearchDetail {
                header: DetailHeader {
                    title: "Quarterly review".to_string(),
                    when: None,
                    location: None,
                },
                attendees: vec![],
                analysis: None,
                preparation: None,
                description: None,
            }
        );
    }

    #[test]
    fn long_research_summary_is_cut_at_five_hundred_characters() {
        let mut meeting = bare_meeting();
        let summary: String = ('a'..='z').cycle().take(800).collect();
        meeting.research_summary = Some(summary.clone());

        let analysis = render(&meeting, ClockFormat::TwentyFourHour).analysis.unwrap();

        assert_eq!(analysis, format!("{}{}", &summary[..500], ELLIPSIS));
        assert!(!analysis.contains(&summary));
    }

    #[test]
    fn preparation_questions_are_cut_at_five_hundred_characters() {
        let mut meeting = bare_meeting();
        meeting.preparation_questions = Some("?".repeat(501));

        let preparation = render(&meeting, ClockFormat::TwentyFourHour).preparation.unwrap();

        assert_eq!(preparation.chars().count(), 500 + ELLIPSIS.len());
    }

    #[test]
    fn attendee_research_is_cut_at_two_hundred_characters() {
        let mut meeting = bare_meeting();
        meeting.attendees.push(researched_attendee(&"r".repeat(350)));

        let detail = render(&meeting, ClockFormat::TwentyFourHour);
        let attendee = &detail.attendees[0];

        assert_eq!(attendee.research, Some(format!("{}{}", "r".repeat(200), ELLIPSIS)));
        assert_eq!(attendee.facts, vec!["grace@example.com", "Rear Admiral"]);
    }

    #[test]
    fn attendee_without_research_has_no_excerpt() {
        let mut meeting = bare_meeting();
        let mut attendee = researched_attendee("");
        attendee.research_summary = None;
        meeting.attendees.push(attendee);

        let detail = render(&meeting, ClockFormat::TwentyFourHour);

        assert_eq!(detail.attendees[0].research, None);
    }

    #[test]
    fn header_shows_time_range_and_location() {
        let mut meeting = bare_meeting();
        let start = Local.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
        meeting.start_time = Some(start);
        meeting.end_time = Some(start + chrono::Duration::minutes(30));
        meeting.location = Some("Room 4".to_string());

        let header = render(&meeting, ClockFormat::TwentyFourHour).header;

        assert_eq!(header.when.as_deref(), Some("Friday, March 1, 2024 at 15:00 - 15:30"));
        assert_eq!(header.location.as_deref(), Some("Room 4"));
    }

    #[test]
    fn opening_second_meeting_replaces_first() {
        let mut overlay = ResearchOverlay::default();
        let detail = render(&bare_meeting(), ClockFormat::TwentyFourHour);

        overlay.open(0, detail.clone());
        overlay.open(2, detail);

        assert_eq!(overlay.meeting_index(), Some(2));
        overlay.close();
        assert!(!overlay.is_open());
        assert!(overlay.detail().is_none());
    }
}
