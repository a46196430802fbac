//! Thumbnail fetching and decoding for the description view.

use eframe::egui::ColorImage;

/// Largest edge worth displaying; bigger images get scaled down before they
/// become GPU textures.
const MAX_EDGE: u32 = 480;

/// Downloads and decodes the thumbnail a describe response points at.
/// Any failure just means no thumbnail; the view renders without one.
pub fn fetch_thumbnail(url: &str) -> Option<ColorImage> {
    let bytes = reqwest::blocking::get(url).ok()?.bytes().ok()?;
    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(url, error = %e, "thumbnail decode failed");
            return None;
        }
    };
    let decoded = if decoded.width() > MAX_EDGE || decoded.height() > MAX_EDGE {
        decoded.thumbnail(MAX_EDGE, MAX_EDGE)
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, &rgba))
}
