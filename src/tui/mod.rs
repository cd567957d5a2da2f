mod session;
mod presentation;
mod calendar_panel;
mod meeting_list;
mod research_overlay;
mod search_overlay;

pub use session::run_tui;
