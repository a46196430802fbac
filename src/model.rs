//! Data models for the backend API and the UI state machine.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long the download-success banner stays visible.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// JSON body for a `POST /api/info` request.
#[derive(Serialize, Debug)]
pub struct InfoRequest<'a> {
    pub url: &'a str,
}

/// JSON body for a `POST /api/download` request.
#[derive(Serialize, Debug)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub format_id: &'a str,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A display field that arrives as either a JSON string or a number
/// (the backend reports durations as raw seconds).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            DisplayValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Metadata and format list returned by the info endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MediaDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<DisplayValue>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Echoed by the server; download requests must reuse this exact value.
    pub url: String,
    #[serde(default)]
    pub formats: Vec<FormatOption>,
}

impl MediaDescription {
    /// Label/value pairs for the metadata grid, placeholders filled in.
    pub fn info_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Title",
                self.title.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Duration",
                self.duration
                    .as_ref()
                    .map(DisplayValue::to_string)
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            (
                "Platform",
                self.platform
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            (
                "Upload Date",
                self.upload_date
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
        ]
    }
}

/// One quality/container variant the backend can produce for a source URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormatOption {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    /// The only field the download request needs.
    pub format_id: String,
}

impl FormatOption {
    /// Headline label for the option row.
    pub fn quality_label(&self) -> &str {
        self.quality.as_deref().unwrap_or("Download")
    }

    /// Secondary line: resolution and container, whichever are known.
    pub fn details(&self) -> String {
        match (self.resolution.as_deref(), self.format.as_deref()) {
            (Some(resolution), Some(format)) => format!("{resolution} ({format})"),
            (Some(resolution), None) => resolution.to_string(),
            (None, Some(format)) => format!("({format})"),
            (None, None) => String::new(),
        }
    }
}

/// Payload of a completed download, alive only until it is written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedMedia {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What the window currently shows. Exactly one variant at a time; every
/// transition replaces the previous display wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    /// Nothing submitted yet, or a success banner already expired.
    Idle,
    /// A describe or download call is in flight.
    Loading,
    /// Describe succeeded; metadata and options stay up until the next
    /// submission.
    Described(MediaDescription),
    /// A file was saved; transient banner.
    Saved { filename: String, shown_at: Instant },
    /// The last operation failed; sticky until the next Loading transition.
    Failed(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// Retires an expired success banner. Any other state is left alone, so a
    /// transition that already replaced the banner makes the old expiry moot.
    pub fn tick(&mut self, now: Instant) {
        if let UiState::Saved { shown_at, .. } = self {
            if now.duration_since(*shown_at) >= BANNER_DURATION {
                *self = UiState::Idle;
            }
        }
    }
}
