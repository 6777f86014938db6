//! Preview refresh and paging.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::preview::{PreviewRenderer, RenderTier};
use crate::session::Session;
use crate::viewer;

/// Re-render when the deck is stale (or unconditionally with `force`).
/// Repeated refreshes without mutation are idempotent no-ops.
pub async fn refresh(session: &mut Session, cfg: &Config, force: bool) -> Result<()> {
    if !force && !session.document.is_dirty() && !session.preview.is_empty() {
        println!("preview up to date ({} images)", session.preview.len());
        return Ok(());
    }

    let renderer = PreviewRenderer::from_config(cfg);
    let preview = renderer.render(&mut session.document, &session.store).await;
    session.tier = Some(preview.tier);
    session.preview = preview.images;
    session.cursor = session.cursor.clamp(1, session.preview.len().max(1) as i64);

    let count = session.preview.len();
    match preview.tier {
        RenderTier::Converted => println!("{} {} images (converted)", "rendered:".green(), count),
        RenderTier::Synthetic => println!("{} {} images (synthetic)", "rendered:".yellow(), count),
        RenderTier::ErrorPlaceholder => {
            println!("{} {} image (error placeholder)", "rendered:".red(), count)
        }
    }
    Ok(())
}

pub fn show_current(session: &Session) {
    let frame = viewer::show(&session.preview, session.cursor);
    match frame.image {
        Some(image) => println!(
            "slide {}/{}: {}",
            frame.index,
            frame.total,
            image.path.display()
        ),
        None => println!("nothing to show yet; add slides and run `preview`"),
    }
}

/// Write the embeddable HTML panel for the current frame.
pub fn write_html(session: &Session, out: &Path) -> Result<()> {
    let html = viewer::panel_html(&session.preview, session.cursor);
    fs::write(out, html).with_context(|| format!("could not write '{}'", out.display()))?;
    println!("{} {}", "html written:".green(), out.display());
    Ok(())
}
