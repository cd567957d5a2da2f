//! Meeting panel: the lifecycle of one date selection.
//!
//! Every selection issues a [`FetchTicket`]. Only a result carrying the
//! panel's current ticket is rendered; anything else is a stale response
//! from a superseded selection and is dropped. Both timers (loading
//! indicator, status expiry) are deadlines owned by the panel and advanced
//! through [`MeetingPanel::tick`].

pub mod loading;
pub mod status;

use std::time::Instant;

use chrono::NaiveDate;

use crate::calendar::Meeting;
use crate::service::meetings_api::ApiError;

pub use loading::{LoadingIndicator, LOADING_PERIOD, LOADING_VARIANTS};
pub use status::{StatusBanner, StatusKind, StatusMessage, STATUS_LIFETIME};

pub const EMPTY_STATUS: &str = "No meetings found for this date";
pub const ERROR_STATUS: &str = "Failed to load meetings - the meeting service may be unavailable";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    Loading,
    Success(Vec<Meeting>),
    Empty,
    Error(String),
}

/// Identity of one fetch: the date it was issued for and its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub date: NaiveDate,
    pub seq: u64,
}

pub struct MeetingPanel {
    state: PanelState,
    ticket: Option<FetchTicket>,
    next_seq: u64,
    loading: Option<LoadingIndicator>,
    status: StatusBanner,
}

impl MeetingPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Idle,
            ticket: None,
            next_seq: 0,
            loading: None,
            status: StatusBanner::default(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn current_ticket(&self) -> Option<FetchTicket> {
        self.ticket
    }

    pub fn loading(&self) -> Option<&LoadingIndicator> {
        self.loading.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.current()
    }

    pub fn meetings(&self) -> &[Meeting] {
        match &self.state {
            PanelState::Success(meetings) => meetings,
            _ => &[],
        }
    }

    /// Enters `Loading` for `date` and returns the ticket the fetch must carry.
    pub fn begin(&mut self, date: NaiveDate, now: Instant) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket { date, seq: self.next_seq };

        if let Some(previous) = self.ticket.replace(ticket)
            && self.state == PanelState::Loading
        {
            tracing::debug!("Superseding in-flight fetch for {} (#{})", previous.date, previous.seq);
        }

        self.loading = Some(LoadingIndicator::start(now));
        self.state = PanelState::Loading;
        tracing::info!("Loading meetings for {} (#{})", date, ticket.seq);
        ticket
    }

    /// Applies a fetch result. Returns false when the result was stale and dropped.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Meeting>, ApiError>,
        now: Instant,
    ) -> bool {
        if self.ticket != Some(ticket) || self.state != PanelState::Loading {
            tracing::debug!("Dropping stale result for {} (#{})", ticket.date, ticket.seq);
            return false;
        }

        self.loading = None;

        match result {
            Ok(meetings) if meetings.is_empty() => {
                tracing::info!("No meetings on {}", ticket.date);
                self.state = PanelState::Empty;
                self.status.publish(StatusKind::Success, EMPTY_STATUS, now);
            }
            Ok(meetings) => {
                let count = meetings.len();
                tracing::info!("Showing {} meetings for {}", count, ticket.date);
                self.state = PanelState::Success(meetings);
                self.status.publish(StatusKind::Success, found_message(count), now);
            }
            Err(e) => {
                tracing::error!("Failed to load meetings for {}: {}", ticket.date, e);
                self.state = PanelState::Error(error_message(&e));
                self.status.publish(StatusKind::Error, ERROR_STATUS, now);
            }
        }
        true
    }

    /// Advances both timers. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let frame_changed = self
            .loading
            .as_mut()
            .is_some_and(|indicator| indicator.advance(now));
        let status_cleared = self.status.expire(now);
        frame_changed || status_cleared
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let loading = self.loading.as_ref().map(LoadingIndicator::next_change);
        match (loading, self.status.expires_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Publishes a banner that is not tied to a fetch, e.g. from the next-meeting lookup.
    pub fn notify(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.status.publish(kind, text, now);
    }

    pub fn teardown(&mut self) {
        self.loading = None;
        self.status.clear();
        self.ticket = None;
        self.state = PanelState::Idle;
        tracing::info!("Meeting panel torn down");
    }
}

impl Default for MeetingPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn found_message(count: usize) -> String {
    format!("Found {} meeting{}", count, if count == 1 { "" } else { "s" })
}

pub fn error_message(error: &ApiError) -> String {
    format!("Could not load meetings: {}. The meeting service may be unavailable.", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn meeting(title: &str) -> Meeting {
        Meeting {
            id: None,
            title: title.to_string(),
            attendee_names: vec!["A".to_string(), "B".to_string()],
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            research_summary: None,
            preparation_questions: None,
            attendees: vec![],
        }
    }

    fn server_error() -> ApiError {
        ApiError::StatusError { status: 500, body: "Internal Server Error".to_string() }
    }

    #[test]
    fn new_panel_is_idle_without_timers() {
        let panel = MeetingPanel::new();

        assert_eq!(panel.state(), &PanelState::Idle);
        assert_eq!(panel.next_deadline(), None);
    }

    #[test]
    fn begin_enters_loading_with_fresh_indicator() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();

        let ticket = panel.begin(date(2024, 3, 1), now);

        assert_eq!(panel.state(), &PanelState::Loading);
        assert_eq!(ticket.date, date(2024, 3, 1));
        assert_eq!(panel.loading().map(LoadingIndicator::frame), Some(0));
        assert_eq!(panel.next_deadline(), Some(now + LOADING_PERIOD));
    }

    #[test]
    fn non_empty_result_is_success() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), now);

        assert!(panel.resolve(ticket, Ok(vec![meeting("Sync")]), now));

        assert_eq!(panel.meetings().len(), 1);
        assert_eq!(panel.meetings()[0].title, "Sync");
        assert_eq!(panel.status().map(|s| s.kind), Some(StatusKind::Success));
        assert_eq!(panel.status().map(|s| s.text.as_str()), Some("Found 1 meeting"));
    }

    #[test]
    fn empty_result_is_empty_with_auto_clearing_banner() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), now);

        panel.resolve(ticket, Ok(vec![]), now);

        assert_eq!(panel.state(), &PanelState::Empty);
        assert_eq!(panel.status().map(|s| s.text.as_str()), Some(EMPTY_STATUS));
        assert_eq!(panel.next_deadline(), Some(now + STATUS_LIFETIME));

        panel.tick(now + Duration::from_millis(2999));
        assert!(panel.status().is_some());
        panel.tick(now + Duration::from_millis(3000));
        assert!(panel.status().is_none());
        assert_eq!(panel.next_deadline(), None);
    }

    #[test]
    fn failure_is_error_naming_service_unavailability() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), now);

        panel.resolve(ticket, Err(server_error()), now);

        match panel.state() {
            PanelState::Error(message) => {
                assert!(message.contains("service may be unavailable"));
                assert!(message.contains("500"));
            }
            other => panic!("expected error state, got {other:?}"),
        }
        assert_eq!(panel.status().map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn late_result_for_superseded_date_is_dropped() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let old = panel.begin(date(2024, 3, 1), now);
        let new = panel.begin(date(2024, 3, 2), now);

        assert!(!panel.resolve(old, Ok(vec![meeting("Old")]), now));
        assert_eq!(panel.state(), &PanelState::Loading);

        assert!(panel.resolve(new, Ok(vec![meeting("New")]), now));
        assert_eq!(panel.meetings()[0].title, "New");
    }

    #[test]
    fn old_result_arriving_after_newer_one_never_overwrites() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let old = panel.begin(date(2024, 3, 1), now);
        let new = panel.begin(date(2024, 3, 2), now);

        panel.resolve(new, Ok(vec![]), now);
        assert!(!panel.resolve(old, Err(server_error()), now));

        assert_eq!(panel.state(), &PanelState::Empty);
        assert_eq!(panel.status().map(|s| s.kind), Some(StatusKind::Success));
    }

    #[test]
    fn reselecting_same_date_drops_the_earlier_request() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let first = panel.begin(date(2024, 3, 1), now);
        let retry = panel.begin(date(2024, 3, 1), now);

        assert_ne!(first, retry);
        assert!(!panel.resolve(first, Err(server_error()), now));
        assert!(panel.resolve(retry, Ok(vec![meeting("Sync")]), now));
    }

    #[test]
    fn duplicate_delivery_is_ignored_after_resolution() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), now);

        panel.resolve(ticket, Ok(vec![meeting("Sync")]), now);

        assert!(!panel.resolve(ticket, Ok(vec![]), now));
        assert_eq!(panel.meetings().len(), 1);
    }

    #[test]
    fn indicator_cycles_every_period_while_loading() {
        let start = Instant::now();
        let mut panel = MeetingPanel::new();
        panel.begin(date(2024, 3, 1), start);

        let mut seen = vec![];
        for step in 1..=4u32 {
            assert!(panel.tick(start + LOADING_PERIOD * step));
            seen.push(panel.loading().map(LoadingIndicator::text));
        }

        assert_eq!(
            seen,
            vec![
                Some(LOADING_VARIANTS[1]),
                Some(LOADING_VARIANTS[2]),
                Some(LOADING_VARIANTS[3]),
                Some(LOADING_VARIANTS[0]),
            ]
        );
    }

    #[test]
    fn indicator_stops_when_loading_ends() {
        let start = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), start);
        panel.tick(start + LOADING_PERIOD);

        panel.resolve(ticket, Ok(vec![meeting("Sync")]), start + LOADING_PERIOD);

        assert!(panel.loading().is_none());
        assert!(!panel.tick(start + LOADING_PERIOD * 2));
        assert_eq!(panel.next_deadline(), Some(start + LOADING_PERIOD + STATUS_LIFETIME));
    }

    #[test]
    fn new_selection_restarts_indicator_at_first_variant() {
        let start = Instant::now();
        let mut panel = MeetingPanel::new();
        panel.begin(date(2024, 3, 1), start);
        panel.tick(start + LOADING_PERIOD * 2);
        assert_eq!(panel.loading().map(LoadingIndicator::frame), Some(2));

        let later = start + Duration::from_millis(1200);
        panel.begin(date(2024, 3, 2), later);

        assert_eq!(panel.loading().map(LoadingIndicator::frame), Some(0));
        assert_eq!(panel.next_deadline(), Some(later + LOADING_PERIOD));
    }

    #[test]
    fn teardown_cancels_timers() {
        let now = Instant::now();
        let mut panel = MeetingPanel::new();
        let ticket = panel.begin(date(2024, 3, 1), now);
        panel.notify(StatusKind::Success, "hello", now);

        panel.teardown();

        assert_eq!(panel.state(), &PanelState::Idle);
        assert_eq!(panel.next_deadline(), None);
        assert!(!panel.resolve(ticket, Ok(vec![]), now));
    }
}
