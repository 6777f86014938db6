//! Slide insertion and artifact selection.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use owo_colors::OwoColorize;

use crate::deck::SlideLayout;
use crate::session::Session;

/// Append a slide using the layout name and whatever artifact was picked
/// with `use`. The deck is marked stale even when the slide ends up
/// visually empty.
pub fn add(session: &mut Session, layout_name: &str, title: &str, body: &str) -> Result<()> {
    let layout = SlideLayout::parse(layout_name).ok_or_else(|| {
        anyhow!(
            "unknown layout '{}' (expected one of: {})",
            layout_name,
            SlideLayout::ALL.map(|l| l.label()).join(", ")
        )
    })?;
    let artifact = session.pending_artifact.take();
    session
        .document
        .add_slide(title, body, layout, artifact.clone());
    match artifact {
        Some(path) => println!(
            "{} slide {} added ({}, artifact {})",
            "ok:".green(),
            session.document.len(),
            layout.label(),
            path.display()
        ),
        None => println!(
            "{} slide {} added ({})",
            "ok:".green(),
            session.document.len(),
            layout.label()
        ),
    }
    Ok(())
}

/// Resolve a `use` selector into an artifact path for the next slide:
/// `latest`, `turn:<id>`, a gallery number, a literal path, or `none`.
pub fn select(session: &mut Session, selector: &str) -> Result<()> {
    let choice = resolve(session, selector)?;
    match &choice {
        Some(path) => {
            if !path.is_file() {
                eprintln!(
                    "{} '{}' is not on disk anymore; the slide will fall back to other artifacts",
                    "warning:".yellow(),
                    path.display()
                );
            }
            println!("{} {}", "selected:".green(), path.display());
        }
        None => println!("artifact selection cleared"),
    }
    session.pending_artifact = choice;
    Ok(())
}

fn resolve(session: &Session, selector: &str) -> Result<Option<PathBuf>> {
    let s = selector.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    if s.eq_ignore_ascii_case("latest") {
        return match session.store.most_recent() {
            Some(p) => Ok(Some(p.to_path_buf())),
            None => bail!("no artifacts produced yet"),
        };
    }
    if let Some(turn) = s.strip_prefix("turn:") {
        let id: u64 = turn.parse()?;
        return match session.store.get(id) {
            Some(p) => Ok(Some(p.to_path_buf())),
            None => bail!("no artifact recorded for turn {}", id),
        };
    }
    if let Ok(number) = s.parse::<usize>() {
        let unique = session.store.all_unique();
        return match number.checked_sub(1).and_then(|i| unique.get(i)) {
            Some(p) => Ok(Some(p.clone())),
            None => bail!("gallery has {} entries, asked for {}", unique.len(), number),
        };
    }
    Ok(Some(PathBuf::from(s)))
}
