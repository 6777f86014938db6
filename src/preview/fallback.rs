//! Synthetic slide rendering, used when external conversion is unavailable.
//!
//! Each slide becomes a plan (title, clipped body lines, thumbnail choice)
//! that is then rasterized onto a fixed canvas. Plans are pure and
//! deterministic; only the backing file paths differ between re-renders.

use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use tracing::warn;

use crate::artifacts::{scratch_file, ArtifactStore};
use crate::deck::{Document, Slide};
use crate::errors::PreviewError;

use super::font::SlideFont;
use super::PreviewImage;

pub const CANVAS_W: u32 = 1200;
pub const CANVAS_H: u32 = 900;

const LINE_CLIP: usize = 200;
const TITLE_PX: f32 = 28.0;
const BODY_PX: f32 = 14.0;
const MARGIN: i32 = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePlan {
    /// 1-based position in the deck.
    pub index: usize,
    pub title: String,
    pub body_lines: Vec<String>,
    pub thumbnail: Option<PathBuf>,
}

/// Build the drawing plan for one slide.
pub fn plan_slide(
    slide: &Slide,
    index: usize,
    store: &ArtifactStore,
    max_body_lines: usize,
) -> SlidePlan {
    let body_lines = slide
        .body
        .lines()
        .take(max_body_lines)
        .map(|l| crate::utils::truncate_chars(l, LINE_CLIP))
        .collect();
    SlidePlan {
        index,
        title: crate::utils::truncate_chars(&slide.title, LINE_CLIP),
        body_lines,
        thumbnail: pick_thumbnail(slide, store),
    }
}

/// The slide's own artifact wins if it is still on disk. Without one, the
/// first store artifact in first-seen order that still exists is used,
/// deliberately not the most recent.
pub fn pick_thumbnail(slide: &Slide, store: &ArtifactStore) -> Option<PathBuf> {
    if let Some(own) = slide.artifact_ref.as_deref() {
        if own.is_file() {
            return Some(own.to_path_buf());
        }
    }
    store
        .all_unique()
        .iter()
        .find(|p| p.is_file())
        .cloned()
}

/// Synthesize one image per slide; an empty deck yields exactly one
/// informational placeholder.
pub fn render_slides(
    document: &Document,
    store: &ArtifactStore,
    font: Option<&SlideFont>,
    scratch: &Path,
    max_body_lines: usize,
) -> Result<Vec<PreviewImage>, PreviewError> {
    std::fs::create_dir_all(scratch)
        .map_err(|e| PreviewError::Synthesis(format!("scratch dir unavailable: {}", e)))?;

    if document.is_empty() {
        let mut img = blank_canvas(Rgb([240, 240, 240]));
        draw_line(&mut img, font, MARGIN + 4, 40, 20.0, Rgb([80, 80, 80]), "No slides available");
        let path = scratch_file(scratch, "placeholder");
        save(&img, &path)?;
        return Ok(vec![PreviewImage {
            slide_index: 1,
            path,
        }]);
    }

    let mut images = Vec::with_capacity(document.len());
    for (i, slide) in document.slides().iter().enumerate() {
        let plan = plan_slide(slide, i + 1, store, max_body_lines);
        let img = rasterize(&plan, font);
        let path = scratch_file(scratch, &format!("fallback-{}", plan.index));
        save(&img, &path)?;
        images.push(PreviewImage {
            slide_index: plan.index,
            path,
        });
    }
    Ok(images)
}

/// Last-tier placeholder carrying the truncated failure message. The write
/// is best-effort: even if it fails the entry is returned and the viewer
/// degrades to its missing-image panel.
pub fn error_image(font: Option<&SlideFont>, scratch: &Path, message: &str) -> PreviewImage {
    let mut img = blank_canvas(Rgb([255, 255, 255]));
    let text = format!("Preview generation failed: {}", message);
    let mut y = 40;
    for chunk in wrap_chars(&text, 90) {
        draw_line(&mut img, font, MARGIN, y, 18.0, Rgb([255, 0, 0]), &chunk);
        y += 26;
    }
    let path = scratch_file(scratch, "error");
    if let Err(err) = save(&img, &path) {
        warn!(error = %err, "error placeholder could not be written");
    }
    PreviewImage {
        slide_index: 1,
        path,
    }
}

fn rasterize(plan: &SlidePlan, font: Option<&SlideFont>) -> RgbImage {
    let mut img = blank_canvas(Rgb([255, 255, 255]));

    if !plan.title.is_empty() {
        draw_line(&mut img, font, MARGIN, 24, TITLE_PX, Rgb([0, 0, 0]), &plan.title);
    }
    let mut y = 80;
    for line in &plan.body_lines {
        if y > CANVAS_H as i32 - 60 {
            break;
        }
        draw_line(&mut img, font, MARGIN, y, BODY_PX, Rgb([0, 0, 0]), line);
        y += 18;
    }

    if let Some(thumb_path) = &plan.thumbnail {
        match image::open(thumb_path) {
            Ok(dynamic) => {
                let thumb = dynamic
                    .thumbnail((CANVAS_W as f32 * 0.6) as u32, (CANVAS_H as f32 * 0.45) as u32)
                    .to_rgb8();
                let ty = ((CANVAS_H as i64 - thumb.height() as i64) / 2).max(140);
                imageops::overlay(&mut img, &thumb, MARGIN as i64, ty);
            }
            // Stale artifact: dropped lazily, the slide renders without it.
            Err(err) => warn!(path = %thumb_path.display(), error = %err, "thumbnail unreadable"),
        }
    }
    img
}

fn blank_canvas(color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(CANVAS_W, CANVAS_H, color)
}

fn save(img: &RgbImage, path: &Path) -> Result<(), PreviewError> {
    img.save(path)
        .map_err(|e| PreviewError::Synthesis(format!("could not write {}: {}", path.display(), e)))
}

/// Draw text when a font is available; otherwise a neutral band so the
/// layout still reads as "there was text here".
pub(crate) fn draw_line(
    img: &mut RgbImage,
    font: Option<&SlideFont>,
    x: i32,
    y: i32,
    px: f32,
    color: Rgb<u8>,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    match font {
        Some(f) => f.draw_text(img, x, y, px, color, text),
        None => {
            let w = ((text.chars().count() as f32) * px * 0.5) as i32;
            let h = (px * 0.8) as i32;
            for dy in 0..h {
                let py = y + dy;
                if py < 0 || py >= img.height() as i32 {
                    continue;
                }
                for dx in 0..w.min(img.width() as i32 - x) {
                    let pxx = x + dx;
                    if pxx >= 0 {
                        img.put_pixel(pxx as u32, py as u32, Rgb([190, 190, 190]));
                    }
                }
            }
        }
    }
}

fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .take(5)
        .map(|c| c.iter().collect())
        .collect()
}
