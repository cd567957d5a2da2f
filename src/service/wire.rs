//! Payload shapes served by the meeting-research service and their
//! normalization into [`Meeting`].
//!
//! The service has shipped two spellings for the title (`title`,
//! `meeting_title`) and for the attendee name list (`people`,
//! `person_names`). Both are accepted here; the first non-empty value wins.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar::{Attendee, Meeting};

pub const UNTITLED_MEETING: &str = "Untitled meeting";

#[derive(Debug, Default, Deserialize)]
pub struct MeetingListResponse {
    #[serde(default)]
    pub meetings: Vec<WireMeeting>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NextMeetingResponse {
    #[serde(default)]
    pub meeting: Option<WireMeeting>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub keyword: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub meetings: Vec<WireMeeting>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub agent_available: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireMeeting {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    meeting_title: Option<String>,
    #[serde(default)]
    people: Option<Vec<String>>,
    #[serde(default)]
    person_names: Option<Vec<String>>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    research_summary: Option<String>,
    #[serde(default)]
    preparation_questions: Option<String>,
    #[serde(default)]
    attendees: Option<Vec<WireAttendee>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireAttendee {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    research_summary: Option<String>,
    #[serde(default)]
    found_info: Option<bool>,
}

impl WireMeeting {
    pub fn normalize(self) -> Meeting {
        let attendees: Vec<Attendee> = self
            .attendees
            .unwrap_or_default()
            .into_iter()
            .filter_map(WireAttendee::normalize)
            .collect();

        let attendee_names = first_non_empty_list(self.people, self.person_names)
            .unwrap_or_else(|| attendees.iter().map(|a| a.name.clone()).collect());

        Meeting {
            id: non_empty(self.id),
            title: non_empty(self.title)
                .or_else(|| non_empty(self.meeting_title))
                .unwrap_or_else(|| UNTITLED_MEETING.to_string()),
            attendee_names,
            start_time: self.start_time.as_deref().and_then(parse_timestamp),
            end_time: self.end_time.as_deref().and_then(parse_timestamp),
            location: non_empty(self.location),
            description: non_empty(self.description),
            research_summary: non_empty(self.research_summary),
            preparation_questions: non_empty(self.preparation_questions),
            attendees,
        }
    }
}

impl WireAttendee {
    fn normalize(self) -> Option<Attendee> {
        let name = non_empty(self.name).or_else(|| self.email.clone().filter(|e| !e.trim().is_empty()))?;
        Some(Attendee {
            name,
            email: non_empty(self.email),
            company: non_empty(self.company),
            title: non_empty(self.title),
            research_summary: non_empty(self.research_summary),
            found_info: self.found_info.unwrap_or(false),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_non_empty_list(
    primary: Option<Vec<String>>,
    fallback: Option<Vec<String>>,
) -> Option<Vec<String>> {
    primary
        .filter(|names| !names.is_empty())
        .or_else(|| fallback.filter(|names| !names.is_empty()))
}

/// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as local time).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    match naive {
        Ok(naive) => Local.from_local_datetime(&naive).earliest(),
        Err(e) => {
            tracing::warn!("Ignoring unparseable timestamp '{}': {}", raw, e);
            None
        }
    }
}
