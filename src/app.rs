use std::time::Instant;

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::{DayHandle, Meeting, SelectionController};
use crate::config::Config;
use crate::panel::{error_message, FetchTicket, MeetingPanel, StatusKind, ERROR_STATUS};
use crate::service::meetings_api::{ApiError, ServiceHealth};
use crate::ui::research_view::{self, ResearchOverlay};
use crate::ui::search_view::{SearchOverlay, SearchPhase};
use crate::ui::text::ClockFormat;
use crate::ui::theme::Theme;

pub const NO_NEXT_MEETING: &str = "No upcoming meetings found";
pub const EMPTY_KEYWORD: &str = "Enter a keyword to search";
pub const UNDATED_HIT: &str = "That meeting has no start time";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Meetings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    Unknown,
    Online,
    Degraded,
    Offline(String),
}

/// Everything that can change the widget. Each event is applied to completion
/// by [`AppState::dispatch`] before the next one is looked at.
#[derive(Debug)]
pub enum AppEvent {
    PreviousMonth,
    NextMonth,
    MoveDayFocus(i64),
    ActivateFocusedDay,
    DayClicked(DayHandle),
    Today,
    Retry,
    ToggleFocus,
    MoveMeetingFocus(i32),
    OpenResearch(usize),
    OpenFocusedResearch,
    CloseResearch,
    FindNextMeeting,
    OpenSearch,
    SearchInput(char),
    SearchBackspace,
    SubmitSearch,
    EditSearch,
    MoveSearchFocus(i32),
    PickSearchHit,
    CloseSearch,
    MeetingsLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Meeting>, ApiError>,
    },
    NextMeetingLoaded {
        seq: u64,
        result: Result<Option<Meeting>, ApiError>,
    },
    SearchLoaded {
        seq: u64,
        result: Result<Vec<Meeting>, ApiError>,
    },
    HealthChecked(Result<ServiceHealth, ApiError>),
    Tick,
    Quit,
}

/// Side effects requested by a dispatch; carried out by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchMeetings(FetchTicket),
    FetchNextMeeting(u64),
    SearchMeetings { seq: u64, keyword: String },
    Quit,
}

pub struct AppState {
    pub selection: SelectionController,
    pub panel: MeetingPanel,
    pub research: ResearchOverlay,
    pub search: Option<SearchOverlay>,
    pub focus: Focus,
    pub focus_date: NaiveDate,
    pub meeting_index: usize,
    pub service_status: ServiceStatus,
    pub today: NaiveDate,
    pub theme: Theme,
    pub clock: ClockFormat,
    request_seq: u64,
    /// Next-meeting lookup still wanted; any selection cancels it.
    pending_next: Option<u64>,
}

impl AppState {
    pub fn new(today: NaiveDate, config: &Config) -> Self {
        Self {
            selection: SelectionController::new(today, config.week_start()),
            panel: MeetingPanel::new(),
            research: ResearchOverlay::default(),
            search: None,
            focus: Focus::Calendar,
            focus_date: today,
            meeting_index: 0,
            service_status: ServiceStatus::Unknown,
            today,
            theme: Theme::get_by_name(&config.ui.theme),
            clock: config.clock(),
            request_seq: 0,
            pending_next: None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.panel.next_deadline()
    }

    pub fn dispatch(&mut self, event: AppEvent, now: Instant) -> Vec<Command> {
        match event {
            AppEvent::PreviousMonth => self.navigate(-1),
            AppEvent::NextMonth => self.navigate(1),
            AppEvent::MoveDayFocus(days) => self.move_day_focus(days),
            AppEvent::ActivateFocusedDay => {
                let handle = self
                    .selection
                    .grid()
                    .position_of(self.focus_date)
                    .and_then(|i| self.selection.grid().cells[i].handle);
                if let Some(handle) = handle {
                    return self.select(handle.date(), now);
                }
            }
            AppEvent::DayClicked(handle) => return self.select(handle.date(), now),
            AppEvent::Today => {
                self.focus_date = self.today;
                self.selection.jump_to(self.today);
            }
            AppEvent::Retry => {
                if let Some(date) = self.selection.selected() {
                    return self.select(date, now);
                }
            }
            AppEvent::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Calendar if !self.panel.meetings().is_empty() => Focus::Meetings,
                    _ => Focus::Calendar,
                };
            }
            AppEvent::MoveMeetingFocus(delta) => {
                let count = self.panel.meetings().len();
                if count > 0 {
                    let target = self.meeting_index as i64 + delta as i64;
                    self.meeting_index = target.clamp(0, count as i64 - 1) as usize;
                }
            }
            AppEvent::OpenResearch(index) => self.open_research(index),
            AppEvent::OpenFocusedResearch => self.open_research(self.meeting_index),
            AppEvent::CloseResearch => self.research.close(),
            AppEvent::FindNextMeeting => {
                let seq = self.next_request_seq();
                self.pending_next = Some(seq);
                return vec![Command::FetchNextMeeting(seq)];
            }
            AppEvent::OpenSearch => {
                self.research.close();
                self.search.get_or_insert_with(SearchOverlay::new).edit();
            }
            AppEvent::SearchInput(c) => {
                if let Some(search) = self.search.as_mut().filter(|s| s.is_editing()) {
                    search.push(c);
                }
            }
            AppEvent::SearchBackspace => {
                if let Some(search) = self.search.as_mut().filter(|s| s.is_editing()) {
                    search.pop();
                }
            }
            AppEvent::SubmitSearch => return self.submit_search(now),
            AppEvent::EditSearch => {
                if let Some(search) = self.search.as_mut() {
                    search.edit();
                }
            }
            AppEvent::MoveSearchFocus(delta) => {
                if let Some(search) = self.search.as_mut() {
                    search.move_cursor(delta);
                }
            }
            AppEvent::PickSearchHit => return self.pick_search_hit(now),
            AppEvent::CloseSearch => self.search = None,
            AppEvent::MeetingsLoaded { ticket, result } => {
                let observed = self.observed_status(result.as_ref().err());
                if self.panel.resolve(ticket, result, now) {
                    if let Some(status) = observed {
                        self.service_status = status;
                    }
                    if self.panel.meetings().is_empty() {
                        self.focus = Focus::Calendar;
                    }
                }
            }
            AppEvent::NextMeetingLoaded { seq, result } => {
                if self.pending_next != Some(seq) {
                    tracing::debug!("Dropping next-meeting result {}: selection changed since", seq);
                    return Vec::new();
                }
                self.pending_next = None;
                return self.apply_next_meeting(result, now);
            }
            AppEvent::SearchLoaded { seq, result } => self.apply_search(seq, result),
            AppEvent::HealthChecked(result) => {
                self.service_status = match result {
                    Ok(ServiceHealth::Healthy) => ServiceStatus::Online,
                    Ok(ServiceHealth::Degraded) => ServiceStatus::Degraded,
                    Err(e) => ServiceStatus::Offline(e.to_string()),
                };
                tracing::info!("Service status: {:?}", self.service_status);
            }
            AppEvent::Tick => {
                self.panel.tick(now);
            }
            AppEvent::Quit => {
                self.teardown();
                return vec![Command::Quit];
            }
        }
        Vec::new()
    }

    pub fn teardown(&mut self) {
        self.research.close();
        self.search = None;
        self.pending_next = None;
        self.panel.teardown();
    }

    fn navigate(&mut self, delta: i32) {
        self.selection.navigate(delta);
        let cursor = self.selection.cursor();
        let day = self.focus_date.day().min(cursor.days_in_month());
        if let Some(date) = NaiveDate::from_ymd_opt(cursor.year(), cursor.month() + 1, day) {
            self.focus_date = date;
        }
    }

    fn move_day_focus(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.focus_date.checked_add_days(Days::new(days as u64))
        } else {
            self.focus_date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.focus_date = date;
            self.selection.jump_to(date);
        }
    }

    fn select(&mut self, date: NaiveDate, now: Instant) -> Vec<Command> {
        let date = self.selection.select(date);
        self.focus_date = date;
        self.research.close();
        self.search = None;
        self.pending_next = None;
        self.meeting_index = 0;
        self.focus = Focus::Calendar;
        let ticket = self.panel.begin(date, now);
        vec![Command::FetchMeetings(ticket)]
    }

    fn open_research(&mut self, index: usize) {
        let Some(meeting) = self.panel.meetings().get(index) else {
            tracing::debug!("No meeting at index {} to research", index);
            return;
        };
        let detail = research_view::render(meeting, self.clock);
        self.meeting_index = index;
        self.research.open(index, detail);
    }

    fn apply_next_meeting(&mut self, result: Result<Option<Meeting>, ApiError>, now: Instant) -> Vec<Command> {
        self.note_service_result(result.as_ref().err());
        match result {
            Ok(Some(meeting)) => match meeting.start_time {
                Some(start) => {
                    let date = start.date_naive();
                    tracing::info!("Next meeting '{}' on {}", meeting.title, date);
                    self.selection.jump_to(date);
                    return self.select(date, now);
                }
                None => {
                    tracing::warn!("Next meeting '{}' has no start time", meeting.title);
                    self.panel.notify(StatusKind::Error, "Next meeting has no start time", now);
                }
            },
            Ok(None) => self.panel.notify(StatusKind::Success, NO_NEXT_MEETING, now),
            Err(e) => {
                tracing::error!("Failed to look up next meeting: {}", e);
                self.panel.notify(StatusKind::Error, ERROR_STATUS, now);
            }
        }
        Vec::new()
    }

    fn next_request_seq(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    fn submit_search(&mut self, now: Instant) -> Vec<Command> {
        let Some(keyword) = self.search.as_ref().and_then(|s| s.keyword()).map(str::to_string) else {
            if self.search.is_some() {
                self.panel.notify(StatusKind::Error, EMPTY_KEYWORD, now);
            }
            return Vec::new();
        };
        let seq = self.next_request_seq();
        if let Some(search) = self.search.as_mut() {
            search.begin(seq);
        }
        tracing::info!("Searching meetings for '{}'", keyword);
        vec![Command::SearchMeetings { seq, keyword }]
    }

    fn apply_search(&mut self, seq: u64, result: Result<Vec<Meeting>, ApiError>) {
        let observed = self.observed_status(result.as_ref().err());
        let Some(search) = self.search.as_mut().filter(|s| s.is_waiting_on(seq)) else {
            tracing::debug!("Dropping search result {}: no longer awaited", seq);
            return;
        };
        search.phase = match result {
            Ok(hits) => SearchPhase::Results(hits),
            Err(e) => {
                tracing::error!("Meeting search failed: {}", e);
                SearchPhase::Failed(error_message(&e))
            }
        };
        if let Some(status) = observed {
            self.service_status = status;
        }
    }

    fn pick_search_hit(&mut self, now: Instant) -> Vec<Command> {
        let Some(hit) = self.search.as_ref().and_then(|s| s.focused_hit()) else {
            return Vec::new();
        };
        match hit.start_time {
            Some(start) => {
                let date = start.date_naive();
                tracing::info!("Search hit '{}' on {}", hit.title, date);
                self.selection.jump_to(date);
                self.select(date, now)
            }
            None => {
                self.panel.notify(StatusKind::Error, UNDATED_HIT, now);
                Vec::new()
            }
        }
    }

    fn note_service_result(&mut self, error: Option<&ApiError>) {
        if let Some(status) = self.observed_status(error) {
            self.service_status = status;
        }
    }

    /// What a finished request says about the service, if anything.
    fn observed_status(&self, error: Option<&ApiError>) -> Option<ServiceStatus> {
        match error {
            Some(ApiError::HttpError(e)) => Some(ServiceStatus::Offline(e.to_string())),
            Some(_) => None,
            None if matches!(self.service_status, ServiceStatus::Degraded) => None,
            None => Some(ServiceStatus::Online),
        }
    }
}
