//! Desktop client for a remote media download service.
//!
//! The user pastes a YouTube or Instagram link; the app asks the backend to
//! describe it, shows the metadata and the available formats, and downloads a
//! chosen format to a file the user picks.

// HTTP client for the two backend operations
pub mod api;
// The egui application: state machine, render loop, event pump
pub mod app;
// Filename extraction from the download response header
pub mod content_disposition;
// Data models for the backend API and the UI state
pub mod model;
// Thumbnail fetching module
pub mod thumbnail;
// Pre-flight URL validation
pub mod validate;
