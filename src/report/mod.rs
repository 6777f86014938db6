//! PDF report export.
//!
//! Adjacent to the preview pipeline, not part of the cascade: ordered text
//! blocks followed by one full-page image per supplied artifact path. Pages
//! are composed as fixed-size raster canvases with the same drawing stack
//! as the synthetic preview tier and wrapped into a minimal PDF container
//! (one JPEG stream per page). Text-layout PDF backends are out of scope.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, Rgb, RgbImage};
use tracing::warn;

use crate::errors::ExportError;
use crate::preview::fallback::draw_line;
use crate::preview::font::SlideFont;
use crate::utils::truncate_chars;

pub const PAGE_W: u32 = 1100;
pub const PAGE_H: u32 = 1400;

pub fn export_report(
    title: &str,
    text_blocks: &[String],
    image_paths: &[PathBuf],
    font: Option<&SlideFont>,
    out_path: &Path,
) -> Result<PathBuf, ExportError> {
    let pages = compose_pages(title, text_blocks, image_paths, font);
    let mut encoded = Vec::with_capacity(pages.len());
    for page in &pages {
        encoded.push((page.width(), page.height(), encode_jpeg(page)?));
    }
    fs::write(out_path, build_pdf(&encoded))?;
    Ok(out_path.to_path_buf())
}

fn compose_pages(
    title: &str,
    text_blocks: &[String],
    image_paths: &[PathBuf],
    font: Option<&SlideFont>,
) -> Vec<RgbImage> {
    let mut pages = Vec::new();
    let mut page = blank_page();
    draw_line(&mut page, font, 36, 40, 22.0, Rgb([0, 0, 0]), title);
    let mut y = 88;

    for block in text_blocks {
        for line in block.lines() {
            if y > PAGE_H as i32 - 100 {
                pages.push(std::mem::replace(&mut page, blank_page()));
                y = 40;
            }
            draw_line(
                &mut page,
                font,
                36,
                y,
                14.0,
                Rgb([0, 0, 0]),
                &truncate_chars(line, 120),
            );
            y += 18;
        }
        y += 8;
    }
    pages.push(page);

    for path in image_paths {
        match image::open(path) {
            Ok(dynamic) => {
                let thumb = dynamic.thumbnail(PAGE_W - 72, PAGE_H - 200).to_rgb8();
                let mut canvas = blank_page();
                imageops::overlay(&mut canvas, &thumb, 36, 100);
                pages.push(canvas);
            }
            // Stale artifact paths are skipped, not fatal.
            Err(err) => warn!(path = %path.display(), error = %err, "report image unreadable"),
        }
    }
    pages
}

fn blank_page() -> RgbImage {
    RgbImage::from_pixel(PAGE_W, PAGE_H, Rgb([255, 255, 255]))
}

fn encode_jpeg(page: &RgbImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, 85);
    page.write_with_encoder(encoder)
        .map_err(|e| ExportError::Compose(e.to_string()))?;
    Ok(buf)
}

/// Minimal PDF container: catalog, page tree, then per page a page object,
/// a DCT-encoded image XObject and a content stream painting it full-page.
/// Object ids are sequential so the xref table can be emitted in one pass.
fn build_pdf(pages: &[(u32, u32, Vec<u8>)]) -> Vec<u8> {
    // MediaBox keeps the 1100x1400 canvas aspect.
    const BOX_W: u32 = 550;
    const BOX_H: u32 = 700;

    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    begin_obj(&mut out, &mut offsets, 1);
    out.extend_from_slice(b"<< /Type /Catalog /Pages 2 0 R >>\n");
    end_obj(&mut out);

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", 3 + 3 * i))
        .collect::<Vec<_>>()
        .join(" ");
    begin_obj(&mut out, &mut offsets, 2);
    out.extend_from_slice(
        format!("<< /Type /Pages /Kids [{}] /Count {} >>\n", kids, pages.len()).as_bytes(),
    );
    end_obj(&mut out);

    for (i, (w, h, jpeg)) in pages.iter().enumerate() {
        let page_id = 3 + 3 * i;
        let image_id = page_id + 1;
        let content_id = page_id + 2;

        begin_obj(&mut out, &mut offsets, page_id);
        out.extend_from_slice(
            format!(
                concat!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] ",
                    "/Resources << /XObject << /Img {} 0 R >> >> /Contents {} 0 R >>\n"
                ),
                BOX_W, BOX_H, image_id, content_id
            )
            .as_bytes(),
        );
        end_obj(&mut out);

        begin_obj(&mut out, &mut offsets, image_id);
        out.extend_from_slice(
            format!(
                concat!(
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} ",
                    "/ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode ",
                    "/Length {} >>\nstream\n"
                ),
                w,
                h,
                jpeg.len()
            )
            .as_bytes(),
        );
        out.extend_from_slice(jpeg);
        out.extend_from_slice(b"\nendstream\n");
        end_obj(&mut out);

        let paint = format!("q {} 0 0 {} 0 0 cm /Img Do Q", BOX_W, BOX_H);
        begin_obj(&mut out, &mut offsets, content_id);
        out.extend_from_slice(
            format!("<< /Length {} >>\nstream\n{}\nendstream\n", paint.len(), paint).as_bytes(),
        );
        end_obj(&mut out);
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    out
}

fn begin_obj(out: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize) {
    debug_assert_eq!(offsets.len() + 1, id);
    offsets.push(out.len());
    out.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
}

fn end_obj(out: &mut Vec<u8>) {
    out.extend_from_slice(b"endobj\n");
}
