//! HTTP client for the two backend operations: describing a media URL and
//! fetching the payload for one chosen format.

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use thiserror::Error;

use crate::content_disposition;
use crate::model::{DownloadRequest, DownloadedMedia, ErrorBody, InfoRequest, MediaDescription};

/// Origin of the media service backend.
pub const API_BASE_URL: &str = "https://media-service-hub.onrender.com";

/// Filename used when the download response names none.
pub const DEFAULT_FILENAME: &str = "download";

const INFO_FALLBACK: &str = "Failed to fetch media information";
const DOWNLOAD_FALLBACK: &str = "Download failed";

/// Failure of one backend call, carrying the message shown to the user:
/// the server's `error` field when it sent one, a generic fallback otherwise.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    DescribeFailed(String),
    #[error("{0}")]
    DownloadFailed(String),
}

/// Thin wrapper over a shared `reqwest::Client` pointed at one backend origin.
///
/// No request timeout is configured; a call waits for the backend as long as
/// it takes. Every call is a single attempt, never retried.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Client against a non-default origin. Tests point this at a local stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Asks the backend to describe `url`: metadata plus downloadable formats.
    pub async fn fetch_info(&self, url: &str) -> Result<MediaDescription, ApiError> {
        tracing::info!(url, "requesting media info");
        let response = self
            .http
            .post(format!("{}/api/info", self.base_url))
            .json(&InfoRequest { url })
            .send()
            .await
            .map_err(|e| ApiError::DescribeFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response, INFO_FALLBACK).await;
            tracing::warn!(%message, "info request rejected");
            return Err(ApiError::DescribeFailed(message));
        }

        response
            .json::<MediaDescription>()
            .await
            .map_err(|e| ApiError::DescribeFailed(e.to_string()))
    }

    /// Fetches the media payload for one format previously described for
    /// `url`. The filename comes from the `Content-Disposition` header.
    pub async fn fetch_media(
        &self,
        url: &str,
        format_id: &str,
    ) -> Result<DownloadedMedia, ApiError> {
        tracing::info!(url, format_id, "requesting media download");
        let response = self
            .http
            .post(format!("{}/api/download", self.base_url))
            .json(&DownloadRequest { url, format_id })
            .send()
            .await
            .map_err(|e| ApiError::DownloadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response, DOWNLOAD_FALLBACK).await;
            tracing::warn!(%message, "download request rejected");
            return Err(ApiError::DownloadFailed(message));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition::filename)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::DownloadFailed(e.to_string()))?;

        tracing::info!(filename, size = bytes.len(), "download body received");
        Ok(DownloadedMedia {
            filename,
            bytes: bytes.to_vec(),
        })
    }
}

/// Pulls the `error` field out of a rejection body, or falls back.
async fn error_message(response: Response, fallback: &str) -> String {
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => message,
        _ => fallback.to_string(),
    }
}
