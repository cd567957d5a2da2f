pub mod fetch;
pub mod meetings_api;
pub mod wire;

pub use meetings_api::{ApiError, MeetingsApi, MeetingsClient, ServiceHealth, DEFAULT_BASE_URL};
