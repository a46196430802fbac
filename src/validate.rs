//! Pre-flight validation of the user's URL. No network, no side effects.

use thiserror::Error;
use url::Url;

/// Platforms the backend supports, matched as plain substrings.
const SUPPORTED_PLATFORMS: [&str; 3] = ["youtube.com", "youtu.be", "instagram.com"];

/// Rejection of a submitted URL before any network traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error("Please enter a URL")]
    Empty,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Unsupported URL. Please use YouTube or Instagram links.")]
    UnsupportedPlatform,
}

/// Checks that `input` parses as a URL and mentions a supported platform.
///
/// The platform check is a substring match over the whole string, not a host
/// comparison: a supported domain appearing anywhere in the string (even
/// inside a query parameter) passes.
pub fn validate_media_url(input: &str) -> Result<(), ValidateError> {
    if input.is_empty() {
        return Err(ValidateError::Empty);
    }
    if Url::parse(input).is_err() {
        return Err(ValidateError::InvalidUrl);
    }
    if !SUPPORTED_PLATFORMS
        .iter()
        .any(|platform| input.contains(platform))
    {
        return Err(ValidateError::UnsupportedPlatform);
    }
    Ok(())
}
