//! Stateless pagination over rendered preview images plus the
//! encode-for-embedding helper for HTML-capable surfaces.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::preview::PreviewImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFrame<'a> {
    pub image: Option<&'a PreviewImage>,
    /// Clamped 1-based index; 1 even when there is nothing to show.
    pub index: usize,
    pub total: usize,
}

/// Clamp the requested index into `[1, len]`. An empty sequence yields an
/// explicit nothing-to-show frame instead of failing.
pub fn show(images: &[PreviewImage], requested: i64) -> ViewFrame<'_> {
    if images.is_empty() {
        return ViewFrame {
            image: None,
            index: 1,
            total: 0,
        };
    }
    let total = images.len();
    let index = requested.clamp(1, total as i64) as usize;
    ViewFrame {
        image: Some(&images[index - 1]),
        index,
        total,
    }
}

/// Inline `data:image/png;base64,...` string for the given file. Fails
/// soft: a missing or unreadable file yields an empty string and the
/// caller shows an error panel instead of an image.
pub fn encode_for_embedding(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => format!("data:image/png;base64,{}", STANDARD.encode(bytes)),
        Err(_) => String::new(),
    }
}

/// Self-contained HTML panel for the current frame. Every degraded case
/// renders a visible message; nothing here can fail the surrounding page.
pub fn panel_html(images: &[PreviewImage], requested: i64) -> String {
    let frame = show(images, requested);
    let Some(image) = frame.image else {
        return "<div style=\"color:#666;padding:12px;\">No preview images available.</div>"
            .to_string();
    };
    let data_uri = encode_for_embedding(&image.path);
    if data_uri.is_empty() {
        return "<div style=\"color:#a00;padding:12px;\">Preview image missing or unreadable.</div>"
            .to_string();
    }
    viewer_template(&data_uri, frame.index, frame.total)
}

fn viewer_template(data_uri: &str, index: usize, total: usize) -> String {
    format!(
        concat!(
            "<div style=\"display:flex;flex-direction:column;align-items:center;",
            "justify-content:center;font-family:Arial,Helvetica,sans-serif;\">\n",
            "  <div style=\"width:100%;display:flex;justify-content:center;\">\n",
            "    <img src=\"{uri}\" style=\"max-width:100%; height:auto; border-radius:8px; ",
            "box-shadow:0 6px 18px rgba(0,0,0,0.12);\" />\n",
            "  </div>\n",
            "  <div style=\"margin-top:8px; color:#333; font-size:14px;\">\n",
            "    Slide <strong>{idx}</strong> of <strong>{total}</strong>\n",
            "  </div>\n",
            "</div>\n",
        ),
        uri = data_uri,
        idx = index,
        total = total,
    )
}
