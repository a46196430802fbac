//! Entry point for the media downloader GUI.

use std::sync::Arc;

use eframe::egui::Visuals;
use media_downloader::app::{self, MediaApp};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Program entry point: initializes logging and the runtime, launches the GUI
fn main() -> Result<(), eframe::Error> {
    // Log to stderr; RUST_LOG narrows or widens the filter
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Create a new Tokio runtime and store it globally
    let rt = Arc::new(Runtime::new().unwrap());
    app::install_runtime(rt);

    // Configure default native options for the egui window
    let options = eframe::NativeOptions::default();
    // Run the application
    eframe::run_native(
        "Media Downloader",
        options,
        Box::new(|cc| {
            // Use dark theme visuals
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(MediaApp::default())
        }),
    )
}
