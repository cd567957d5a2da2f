use crossterm::event::KeyCode;

use crate::app::AppEvent;
use crate::ui::search_view::SearchOverlay;

pub fn handle_key(key: KeyCode, search: &SearchOverlay) -> Option<AppEvent> {
    if search.is_editing() {
        return match key {
            KeyCode::Enter => Some(AppEvent::SubmitSearch),
            KeyCode::Esc => Some(AppEvent::CloseSearch),
            KeyCode::Backspace => Some(AppEvent::SearchBackspace),
            KeyCode::Char(c) => Some(AppEvent::SearchInput(c)),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::MoveSearchFocus(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::MoveSearchFocus(-1)),
        KeyCode::Enter => Some(AppEvent::PickSearchHit),
        KeyCode::Char('/') | KeyCode::Backspace => Some(AppEvent::EditSearch),
        KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::CloseSearch),
        _ => None,
    }
}
