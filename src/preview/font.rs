//! Fallback font loading and glyph drawing for synthesized slides.
//!
//! Glyph coverage comes from fontdue and is alpha-blended straight onto the
//! target buffer. The font is discovered from config or a list of common
//! system locations; when none is found callers degrade to band drawing.

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct SlideFont {
    font: Font,
}

impl SlideFont {
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        let font = Font::from_bytes(bytes, FontSettings::default()).ok()?;
        Some(Self { font })
    }

    /// Explicit config path first, then the candidate list.
    pub fn discover(explicit: Option<&Path>) -> Option<Self> {
        if let Some(p) = explicit {
            if let Some(f) = Self::load(p) {
                return Some(f);
            }
        }
        FONT_CANDIDATES
            .iter()
            .find_map(|p| Self::load(Path::new(p)))
    }

    pub fn line_height(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2)
    }

    /// Draw one line of text with its top-left corner at (x, y). Stops at
    /// the right edge; newlines terminate the line.
    pub fn draw_text(
        &self,
        img: &mut RgbImage,
        x: i32,
        y: i32,
        px: f32,
        color: Rgb<u8>,
        text: &str,
    ) {
        let ascent = self
            .font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);
        let baseline = y + ascent.round() as i32;
        let mut pen = x as f32;
        for ch in text.chars() {
            if ch == '\n' {
                break;
            }
            let (metrics, bitmap) = self.font.rasterize(ch, px);
            let gx = pen.round() as i32 + metrics.xmin;
            let gy = baseline - metrics.ymin - metrics.height as i32;
            blit(img, &bitmap, metrics.width, gx, gy, color);
            pen += metrics.advance_width;
            if pen >= img.width() as f32 {
                break;
            }
        }
    }
}

/// Blend a coverage bitmap onto the image (coverage 0 = background kept,
/// 255 = full glyph color), clipping at the borders.
fn blit(img: &mut RgbImage, bitmap: &[u8], width: usize, gx: i32, gy: i32, color: Rgb<u8>) {
    if width == 0 {
        return;
    }
    let rows = bitmap.len() / width;
    for row in 0..rows {
        let py = gy + row as i32;
        if py < 0 || py >= img.height() as i32 {
            continue;
        }
        for col in 0..width {
            let px = gx + col as i32;
            if px < 0 || px >= img.width() as i32 {
                continue;
            }
            let cov = bitmap[row * width + col] as u32;
            if cov == 0 {
                continue;
            }
            let dst = img.get_pixel_mut(px as u32, py as u32);
            for i in 0..3 {
                let d = dst.0[i] as u32;
                let s = color.0[i] as u32;
                dst.0[i] = ((d * (255 - cov) + s * cov) / 255) as u8;
            }
        }
    }
}
