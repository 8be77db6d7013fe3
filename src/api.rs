use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::types::{Camera, MachineState, RecordEntry, RecordSummary, StateCommand};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response. The server puts a human-readable reason in the
    /// body (e.g. the estop failure cause), so it is kept for alerts.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Typed access to the machine's HTTP API.
///
/// The view controllers only see this trait, so tests drive them with a
/// scripted fake instead of a live server.
#[allow(async_fn_in_trait)]
pub trait MachineApi {
    async fn cameras(&self) -> Result<Vec<Camera>, ApiError>;
    async fn records(&self) -> Result<Vec<RecordEntry>, ApiError>;
    async fn record_summary(&self, record_id: &str) -> Result<RecordSummary, ApiError>;
    async fn record_image(&self, record_id: &str) -> Result<Bytes, ApiError>;
    async fn machine_state(&self) -> Result<MachineState, ApiError>;
    async fn put_state(&self, command: &StateCommand) -> Result<(), ApiError>;
}

/// Page-relative URL of a record's image with a cache-busting timestamp
/// query, so a repeated fetch cannot be served from a cache.
pub fn cache_busted_image_url(record_id: &str, timestamp_ms: i64) -> String {
    format!("api/records/{}/image?time={}", record_id, timestamp_ms)
}

/// reqwest-backed client for the machine API.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Promotes non-2xx responses to `ApiError::Status`, keeping the body.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }
}

impl MachineApi for HttpApiClient {
    async fn cameras(&self) -> Result<Vec<Camera>, ApiError> {
        let response = self.http.get(self.url("/api/cameras")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn records(&self) -> Result<Vec<RecordEntry>, ApiError> {
        let response = self.http.get(self.url("/api/records")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn record_summary(&self, record_id: &str) -> Result<RecordSummary, ApiError> {
        let url = self.url(&format!("/api/records/{}", record_id));
        debug!("fetching record summary from {}", url);
        let response = self.http.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn record_image(&self, record_id: &str) -> Result<Bytes, ApiError> {
        let url = self.url(&format!("/api/records/{}/image", record_id));
        let response = self.http.get(url).send().await?;
        Ok(Self::check(response).await?.bytes().await?)
    }

    async fn machine_state(&self) -> Result<MachineState, ApiError> {
        let response = self.http.get(self.url("/api/machineState")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn put_state(&self, command: &StateCommand) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url("/api/machineState"))
            .json(command)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
