use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::Meeting;
use crate::service::wire::{
    HealthResponse, MeetingListResponse, NextMeetingResponse, SearchRequest, SearchResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Service responded with status {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceHealth {
    Healthy,
    /// Reachable, but the research agent behind it is not.
    Degraded,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    async fn meetings_for_date(&self, date: NaiveDate) -> Result<Vec<Meeting>, ApiError>;

    async fn next_meeting(&self) -> Result<Option<Meeting>, ApiError>;

    /// Meetings whose title or description mention `keyword`, most relevant first.
    async fn search_meetings(&self, keyword: &str) -> Result<Vec<Meeting>, ApiError>;

    async fn health(&self) -> Result<ServiceHealth, ApiError>;
}

pub struct MeetingsClient {
    base_url: String,
    client: reqwest::Client,
}

/// Path segment for a date: calendar date only, no time of day or offset.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl MeetingsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(response, &url).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(response, &url).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        tracing::info!("{} response status: {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Request to {} failed. Status: {}, Body: {}", url, status, body);
            return Err(ApiError::StatusError { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Malformed response from {}: {}", url, e);
            ApiError::ParseError(e.to_string())
        })
    }
}

#[async_trait]
impl MeetingsApi for MeetingsClient {
    async fn meetings_for_date(&self, date: NaiveDate) -> Result<Vec<Meeting>, ApiError> {
        let response: MeetingListResponse = self
            .get_json(&format!("/meetings/{}", date_key(date)))
            .await?;

        let meetings: Vec<Meeting> = response
            .meetings
            .into_iter()
            .map(|m| m.normalize())
            .collect();

        tracing::info!("Fetched {} meetings for {}", meetings.len(), date);
        Ok(meetings)
    }

    async fn next_meeting(&self) -> Result<Option<Meeting>, ApiError> {
        let response: NextMeetingResponse = self.get_json("/next-meeting").await?;
        if response.meeting.is_none()
            && let Some(message) = &response.message
        {
            tracing::info!("No next meeting: {}", message);
        }
        Ok(response.meeting.map(|m| m.normalize()))
    }

    async fn search_meetings(&self, keyword: &str) -> Result<Vec<Meeting>, ApiError> {
        let response: SearchResponse = self
            .post_json("/search-meetings", &SearchRequest { keyword })
            .await?;

        let meetings: Vec<Meeting> = response
            .meetings
            .into_iter()
            .map(|m| m.normalize())
            .collect();

        tracing::info!(
            "Search for '{}' matched {} meetings",
            response.keyword.as_deref().unwrap_or(keyword),
            response.count.unwrap_or(meetings.len())
        );
        Ok(meetings)
    }

    async fn health(&self) -> Result<ServiceHealth, ApiError> {
        let response: HealthResponse = self.get_json("/health").await?;
        Ok(match response.agent_available {
            Some(false) => ServiceHealth::Degraded,
            _ => ServiceHealth::Healthy,
        })
    }
}
