//! The egui application: UI state machine, render loop, and the event pump
//! feeding task completions back into the interface.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, ColorImage, Context, RichText, TextureHandle, TextureOptions};
use eframe::{App, Frame};
use once_cell::sync::OnceCell;
use rfd::FileDialog;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::api::{ApiClient, ApiError};
use crate::model::{DownloadedMedia, MediaDescription, UiState};
use crate::{thumbnail, validate};

// Global Tokio runtime stored in a OnceCell for single-time init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Installs the runtime network tasks are spawned on. Call once at startup.
pub fn install_runtime(rt: Arc<Runtime>) {
    RUNTIME.set(rt).unwrap();
}

fn runtime() -> &'static Arc<Runtime> {
    RUNTIME.get().expect("runtime installed at startup")
}

/// Completions delivered from spawned tasks back to the UI thread.
enum AppEvent {
    /// The describe call settled.
    InfoFetched(Result<MediaDescription, ApiError>),
    /// A download call settled. Overlapping downloads each send one of
    /// these; the last to arrive wins the visible state.
    MediaFetched(Result<DownloadedMedia, ApiError>),
    /// A thumbnail was fetched and decoded for the given source URL.
    ThumbnailLoaded { src: String, image: ColorImage },
}

/// Application state for the GUI
pub struct MediaApp {
    /// Input field for the media URL
    url_input: String,
    /// What the window currently shows
    state: UiState,
    /// Submit lock held while a describe call is in flight
    info_in_flight: bool,
    /// Shared HTTP client for both backend operations
    api: ApiClient,
    /// Sender cloned into every spawned task
    events_tx: UnboundedSender<AppEvent>,
    /// Completions drained at the top of each frame
    events_rx: UnboundedReceiver<AppEvent>,
    /// Decoded thumbnail for the current description, keyed by source URL
    thumbnail: Option<(String, TextureHandle)>,
}

impl Default for MediaApp {
    fn default() -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            url_input: String::new(),
            state: UiState::Idle,
            info_in_flight: false,
            api: ApiClient::new(),
            events_tx,
            events_rx,
            thumbnail: None,
        }
    }
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for MediaApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // 1. Apply task completions queued since the last frame
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(ctx, event);
        }

        // 2. Retire an expired success banner
        self.state.tick(Instant::now());

        // A paste while the URL field is focused replaces the whole field
        // with the clipboard's plain text.
        let pasted = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Paste(text) => Some(text.clone()),
                _ => None,
            })
        });

        // 3. Main panel: URL input plus whatever the current state shows
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Media Downloader");
            ui.label("Paste a YouTube or Instagram link:");

            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.url_input)
                        .hint_text("https://...")
                        .desired_width(380.0),
                );
                if let Some(text) = pasted {
                    if response.has_focus() {
                        self.url_input = text;
                    }
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                if ui
                    .add_enabled(!self.info_in_flight, egui::Button::new("Get Info"))
                    .clicked()
                {
                    submitted = true;
                }
            });

            if submitted && !self.info_in_flight {
                self.submit(ctx);
            }

            ui.separator();
            self.show_state(ctx, ui);
        });

        // Keep repainting so the event pump and the banner timer stay live
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl MediaApp {
    /// Validates the input and, if it passes, kicks off the describe call.
    /// Validation failures show up as errors directly, without Loading.
    fn submit(&mut self, ctx: &Context) {
        let url = self.url_input.trim().to_string();
        if let Err(e) = validate::validate_media_url(&url) {
            self.state = UiState::Failed(e.to_string());
            return;
        }

        self.enter_loading();
        self.info_in_flight = true;

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        runtime().spawn(async move {
            let result = api.fetch_info(&url).await;
            let _ = tx.send(AppEvent::InfoFetched(result));
            ctx.request_repaint();
        });
    }

    /// Kicks off the download of one format. No lock here: overlapping
    /// downloads each settle on their own.
    fn start_download(&mut self, ctx: &Context, url: String, format_id: String) {
        self.enter_loading();

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        runtime().spawn(async move {
            let result = api.fetch_media(&url, &format_id).await;
            let _ = tx.send(AppEvent::MediaFetched(result));
            ctx.request_repaint();
        });
    }

    /// Fetches a thumbnail on the blocking pool; the decoded image comes
    /// back as an event.
    fn spawn_thumbnail_fetch(&self, ctx: &Context, src: String) {
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        runtime().spawn_blocking(move || {
            if let Some(image) = thumbnail::fetch_thumbnail(&src) {
                let _ = tx.send(AppEvent::ThumbnailLoaded { src, image });
                ctx.request_repaint();
            }
        });
    }

    /// Loading replaces whatever was on screen: metadata, options, banner,
    /// and error alike.
    fn enter_loading(&mut self) {
        self.state = UiState::Loading;
        self.thumbnail = None;
    }

    fn apply_event(&mut self, ctx: &Context, event: AppEvent) {
        match event {
            AppEvent::InfoFetched(result) => {
                self.info_in_flight = false;
                match result {
                    Ok(description) => {
                        if let Some(src) = description.thumbnail.clone() {
                            self.spawn_thumbnail_fetch(ctx, src);
                        }
                        self.state = UiState::Described(description);
                    }
                    Err(e) => self.state = UiState::Failed(e.to_string()),
                }
            }
            AppEvent::MediaFetched(result) => match result {
                Ok(media) => self.save_media(media),
                Err(e) => self.state = UiState::Failed(e.to_string()),
            },
            AppEvent::ThumbnailLoaded { src, image } => {
                // Drop results for anything but the description on screen
                let wanted = matches!(
                    &self.state,
                    UiState::Described(d) if d.thumbnail.as_deref() == Some(src.as_str())
                );
                if wanted {
                    let tex = ctx.load_texture(&src, image, TextureOptions::default());
                    self.thumbnail = Some((src, tex));
                }
            }
        }
    }

    /// Asks where to put the payload and writes it out. Cancelling the dialog
    /// abandons the download; the payload is dropped either way.
    fn save_media(&mut self, media: DownloadedMedia) {
        let Some(path) = FileDialog::new().set_file_name(&media.filename).save_file() else {
            self.state = UiState::Idle;
            return;
        };
        match std::fs::write(&path, &media.bytes) {
            Ok(()) => {
                tracing::info!(file = %path.display(), "download saved");
                self.state = UiState::Saved {
                    filename: media.filename,
                    shown_at: Instant::now(),
                };
            }
            Err(e) => self.state = UiState::Failed(format!("Could not save file: {e}")),
        }
    }

    /// Renders the current state. Pure display except for the per-format
    /// download buttons, whose clicks are collected and applied afterwards.
    fn show_state(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        let mut pending_download: Option<(String, String)> = None;

        match &self.state {
            UiState::Idle => {}
            UiState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Working…");
                });
            }
            UiState::Described(description) => {
                ui.heading("Media Information");
                if let Some((src, tex)) = &self.thumbnail {
                    if description.thumbnail.as_deref() == Some(src.as_str()) {
                        ui.add(egui::Image::new(tex).max_width(320.0));
                    }
                }
                egui::Grid::new("media_info").num_columns(2).show(ui, |ui| {
                    for (label, value) in description.info_rows() {
                        ui.label(RichText::new(label).strong());
                        ui.label(value);
                        ui.end_row();
                    }
                });

                ui.separator();
                ui.heading("Download Options");
                if description.formats.is_empty() {
                    ui.label("No download options available");
                } else {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            for option in &description.formats {
                                ui.group(|ui| {
                                    ui.horizontal(|ui| {
                                        ui.vertical(|ui| {
                                            ui.label(
                                                RichText::new(option.quality_label()).strong(),
                                            );
                                            let details = option.details();
                                            if !details.is_empty() {
                                                ui.label(details);
                                            }
                                        });
                                        if ui.button("Download").clicked() {
                                            pending_download = Some((
                                                description.url.clone(),
                                                option.format_id.clone(),
                                            ));
                                        }
                                    });
                                });
                            }
                        });
                }
            }
            UiState::Saved { filename, .. } => {
                ui.colored_label(
                    Color32::from_rgb(0x2e, 0xa0, 0x4e),
                    format!("✅ Saved {filename} successfully!"),
                );
            }
            UiState::Failed(message) => {
                ui.colored_label(
                    Color32::from_rgb(0xd0, 0x45, 0x45),
                    format!("❌ {message}"),
                );
            }
        }

        if let Some((url, format_id)) = pending_download {
            self.start_download(ctx, url, format_id);
        }
    }
}
