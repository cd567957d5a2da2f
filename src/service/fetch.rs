use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::app::AppEvent;
use crate::panel::FetchTicket;
use crate::service::meetings_api::MeetingsApi;

/// Fire-and-forget fetch for one selection. The outcome is posted back tagged
/// with its ticket; the panel decides whether it is still wanted.
pub fn spawn_meetings_fetch(
    api: Arc<dyn MeetingsApi>,
    ticket: FetchTicket,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = api.meetings_for_date(ticket.date).await;
        if events.send(AppEvent::MeetingsLoaded { ticket, result }).is_err() {
            tracing::debug!("Session closed before meetings for {} arrived", ticket.date);
        }
    })
}

pub fn spawn_next_meeting_lookup(
    api: Arc<dyn MeetingsApi>,
    seq: u64,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = api.next_meeting().await;
        if events.send(AppEvent::NextMeetingLoaded { seq, result }).is_err() {
            tracing::debug!("Session closed before next meeting arrived");
        }
    })
}

pub fn spawn_meeting_search(
    api: Arc<dyn MeetingsApi>,
    seq: u64,
    keyword: String,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = api.search_meetings(&keyword).await;
        if events.send(AppEvent::SearchLoaded { seq, result }).is_err() {
            tracing::debug!("Session closed before search for '{}' finished", keyword);
        }
    })
}

pub fn spawn_health_check(
    api: Arc<dyn MeetingsApi>,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = api.health().await;
        let _ = events.send(AppEvent::HealthChecked(result));
    })
}
