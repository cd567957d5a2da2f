pub mod month_view;
pub mod research_view;
pub mod search_view;
pub mod text;
pub mod theme;
