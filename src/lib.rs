pub mod calendar;
pub mod panel;
pub mod service;
pub mod input;
pub mod ui;
pub mod config;
pub mod app;

pub use calendar::{Meeting, MonthCursor, SelectionController};
pub use app::{AppEvent, AppState, Command, ServiceStatus};
pub use panel::{MeetingPanel, PanelState};

pub use input::normal_mode;
