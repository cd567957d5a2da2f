pub mod normal_mode;
pub mod search_mode;
