//! Filename extraction from a `Content-Disposition` response header.

/// Extracts the filename from a raw header value of the usual
/// `attachment; filename="clip.mp4"` shape: everything after the first
/// `filename=`, with quote characters stripped. Returns `None` when the
/// parameter is missing or names nothing.
pub fn filename(header_value: &str) -> Option<String> {
    let (_, rest) = header_value.split_once("filename=")?;
    let name: String = rest.chars().filter(|c| *c != '"').collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
