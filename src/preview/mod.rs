//! Multi-tier preview rendering.
//!
//! Strategies are tried in a fixed order and the first tagged success
//! wins:
//! - Converter tier: serialize the deck to a flat ODF package, convert to
//!   PDF with LibreOffice (bounded by a hard timeout), rasterize pages
//!   with poppler.
//! - Synthetic tier: draw one placeholder image per slide (exactly one
//!   informational image for an empty deck).
//! - Error tier: a single placeholder carrying the truncated failure.
//!
//! The renderer never returns an empty sequence, logs which tier produced
//! the result, and clears the dirty flag on every terminal outcome so a
//! persistent failure cannot auto-retry forever.

pub mod convert;
pub mod fallback;
pub mod font;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::deck::{package, Document, PageGeometry};
use crate::errors::PreviewError;
use crate::utils::truncate_chars;

use font::SlideFont;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// 1-based slide position this image renders.
    pub slide_index: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTier {
    Converted,
    Synthetic,
    ErrorPlaceholder,
}

impl RenderTier {
    pub fn label(self) -> &'static str {
        match self {
            RenderTier::Converted => "converted",
            RenderTier::Synthetic => "synthetic",
            RenderTier::ErrorPlaceholder => "error-placeholder",
        }
    }
}

/// One full render result; partial replacement is not supported, a
/// re-render always produces a brand-new set.
#[derive(Debug)]
pub struct Preview {
    pub images: Vec<PreviewImage>,
    pub tier: RenderTier,
}

#[derive(Debug, Clone)]
pub struct RendererOptions {
    pub soffice: String,
    pub pdftoppm: String,
    pub dpi: u32,
    pub convert_timeout: Duration,
    pub scratch: PathBuf,
    pub geometry: PageGeometry,
    pub font_path: Option<PathBuf>,
    pub body_lines: usize,
}

impl RendererOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            soffice: cfg.soffice_bin(),
            pdftoppm: cfg.pdftoppm_bin(),
            dpi: cfg.preview_dpi(),
            convert_timeout: cfg.convert_timeout(),
            scratch: cfg.scratch_path(),
            geometry: PageGeometry::from_config(cfg),
            font_path: cfg.get_path("FALLBACK_FONT"),
            body_lines: cfg.get_u64("BODY_PREVIEW_LINES").unwrap_or(12) as usize,
        }
    }
}

pub struct PreviewRenderer {
    opts: RendererOptions,
    font: Option<SlideFont>,
}

impl PreviewRenderer {
    pub fn new(opts: RendererOptions) -> Self {
        let font = SlideFont::discover(opts.font_path.as_deref());
        if font.is_none() {
            warn!("no fallback font found; synthesized slides will carry text bands only");
        }
        Self { opts, font }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(RendererOptions::from_config(cfg))
    }

    /// Run the cascade over the current deck. Never returns an empty image
    /// sequence; `dirty` is cleared on every terminal outcome.
    pub async fn render(&self, document: &mut Document, store: &ArtifactStore) -> Preview {
        let preview = match self.converter_tier(document).await {
            Ok(images) => Preview {
                images,
                tier: RenderTier::Converted,
            },
            Err(err) => {
                warn!(error = %err, "conversion tier failed, synthesizing slides");
                match fallback::render_slides(
                    document,
                    store,
                    self.font.as_ref(),
                    &self.opts.scratch,
                    self.opts.body_lines,
                ) {
                    Ok(images) => Preview {
                        images,
                        tier: RenderTier::Synthetic,
                    },
                    Err(err) => {
                        warn!(error = %err, "synthesis failed, emitting error placeholder");
                        let message = truncate_chars(&err.to_string(), 200);
                        Preview {
                            images: vec![fallback::error_image(
                                self.font.as_ref(),
                                &self.opts.scratch,
                                &message,
                            )],
                            tier: RenderTier::ErrorPlaceholder,
                        }
                    }
                }
            }
        };

        document.clear_dirty();
        info!(
            tier = preview.tier.label(),
            images = preview.images.len(),
            "preview rendered"
        );
        preview
    }

    async fn converter_tier(&self, document: &Document) -> Result<Vec<PreviewImage>, PreviewError> {
        if document.is_empty() {
            // Nothing to serialize; the synthetic tier owns the empty-deck
            // placeholder.
            return Err(PreviewError::ConversionProcess(
                "document has no slides".into(),
            ));
        }
        std::fs::create_dir_all(&self.opts.scratch)
            .map_err(|e| PreviewError::ConversionProcess(format!("scratch unavailable: {}", e)))?;

        let package = package::write_package(document, &self.opts.geometry, &self.opts.scratch)
            .map_err(|e| PreviewError::ConversionProcess(format!("package write failed: {}", e)))?;

        let pdf = convert::slides_to_pdf(
            &self.opts.soffice,
            &package,
            &self.opts.scratch,
            self.opts.convert_timeout,
        )
        .await?;

        let pages = convert::pdf_to_pages(
            &self.opts.pdftoppm,
            &pdf,
            self.opts.dpi,
            &self.opts.scratch,
            self.opts.convert_timeout,
        )
        .await?;

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, path)| PreviewImage {
                slide_index: i + 1,
                path,
            })
            .collect())
    }
}
