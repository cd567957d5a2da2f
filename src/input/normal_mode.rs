use crossterm::event::KeyCode;

use crate::app::{AppEvent, AppState, Focus};
use crate::input::search_mode;

pub fn handle_key(key: KeyCode, state: &AppState) -> Option<AppEvent> {
    if let Some(search) = &state.search {
        return search_mode::handle_key(key, search);
    }
    if state.research.is_open() {
        return research_key(key);
    }

    match key {
        KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Char('[') | KeyCode::Char('{') | KeyCode::Char('<') | KeyCode::PageUp => {
            Some(AppEvent::PreviousMonth)
        }
        KeyCode::Char(']') | KeyCode::Char('}') | KeyCode::Char('>') | KeyCode::PageDown => {
            Some(AppEvent::NextMonth)
        }
        KeyCode::Char('t') => Some(AppEvent::Today),
        KeyCode::Char('n') => Some(AppEvent::FindNextMeeting),
        KeyCode::Char('/') => Some(AppEvent::OpenSearch),
        KeyCode::Char('R') => Some(AppEvent::Retry),
        KeyCode::Char('r') => Some(AppEvent::OpenFocusedResearch),
        KeyCode::Tab => Some(AppEvent::ToggleFocus),
        KeyCode::Char('J') => Some(AppEvent::MoveMeetingFocus(1)),
        KeyCode::Char('K') => Some(AppEvent::MoveMeetingFocus(-1)),
        _ => match state.focus {
            Focus::Calendar => calendar_key(key),
            Focus::Meetings => meetings_key(key),
        },
    }
}

fn calendar_key(key: KeyCode) -> Option<AppEvent> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => Some(AppEvent::MoveDayFocus(-1)),
        KeyCode::Char('l') | KeyCode::Right => Some(AppEvent::MoveDayFocus(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::MoveDayFocus(-7)),
        KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::MoveDayFocus(7)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::ActivateFocusedDay),
        _ => None,
    }
}

fn meetings_key(key: KeyCode) -> Option<AppEvent> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::MoveMeetingFocus(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::MoveMeetingFocus(-1)),
        KeyCode::Enter => Some(AppEvent::OpenFocusedResearch),
        KeyCode::Esc => Some(AppEvent::ToggleFocus),
        _ => None,
    }
}

fn research_key(key: KeyCode) -> Option<AppEvent> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => Some(AppEvent::CloseResearch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::research_view::{DetailHeader, ResearchDetail};
    use chrono::NaiveDate;

    fn app() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &Config::default())
    }

    #[test]
    fn brackets_navigate_months() {
        let state = app();

        assert!(matches!(handle_key(KeyCode::Char('['), &state), Some(AppEvent::PreviousMonth)));
        assert!(matches!(handle_key(KeyCode::Char(']'), &state), Some(AppEvent::NextMonth)));
    }

    #[test]
    fn enter_on_calendar_clicks_focused_day() {
        let state = app();

        assert!(matches!(handle_key(KeyCode::Enter, &state), Some(AppEvent::ActivateFocusedDay)));
    }

    #[test]
    fn enter_on_meetings_opens_research() {
        let mut state = app();
        state.focus = Focus::Meetings;

        assert!(matches!(handle_key(KeyCode::Enter, &state), Some(AppEvent::OpenFocusedResearch)));
        assert!(matches!(handle_key(KeyCode::Char('j'), &state), Some(AppEvent::MoveMeetingFocus(1))));
    }

    #[test]
    fn open_overlay_captures_keys() {
        let mut state = app();
        state.research.open(
            0,
            ResearchDetail {
                header: DetailHeader { title: "Sync".to_string(), when: None, location: None },
                attendees: vec![],
                analysis: None,
                preparation: None,
                description: None,
            },
        );

        assert!(matches!(handle_key(KeyCode::Esc, &state), Some(AppEvent::CloseResearch)));
        assert!(matches!(handle_key(KeyCode::Char('q'), &state), Some(AppEvent::CloseResearch)));
        assert!(handle_key(KeyCode::Char(']'), &state).is_none());
    }

    #[test]
    fn slash_opens_search_which_then_owns_the_keyboard() {
        let mut state = app();
        assert!(matches!(handle_key(KeyCode::Char('/'), &state), Some(AppEvent::OpenSearch)));

        state.dispatch(AppEvent::OpenSearch, std::time::Instant::now());

        assert!(matches!(handle_key(KeyCode::Char('q'), &state), Some(AppEvent::SearchInput('q'))));
        assert!(matches!(handle_key(KeyCode::Char(']'), &state), Some(AppEvent::SearchInput(']'))));
    }

    #[test]
    fn unmapped_key_is_ignored() {
        assert!(handle_key(KeyCode::Char('z'), &app()).is_none());
    }
}
