//! PDF report export handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::preview::font::SlideFont;
use crate::report::export_report;
use crate::session::Session;

/// Export the deck text plus every readable artifact as a PDF report.
pub fn export(session: &Session, cfg: &Config, out: &Path) -> Result<()> {
    let mut blocks = vec![format!("Dataset: {}", session.dataset.name)];
    for slide in session.document.slides() {
        let mut block = slide.title.clone();
        if !slide.body.is_empty() {
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(&slide.body);
        }
        if !block.is_empty() {
            blocks.push(block);
        }
    }

    let images: Vec<PathBuf> = session
        .store
        .all_unique()
        .iter()
        .filter(|p| p.is_file())
        .cloned()
        .collect();

    let font = SlideFont::discover(cfg.get_path("FALLBACK_FONT").as_deref());
    let path = export_report("Analysis Report", &blocks, &images, font.as_ref(), out)?;
    println!("{} {}", "report written:".green(), path.display());
    Ok(())
}
