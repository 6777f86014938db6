//! External converter invocations for the primary preview tier.
//!
//! Both converters run headless with piped output and a hard timeout;
//! expiry is indistinguishable from failure for the caller. Success
//! requires exit code 0 *and* the expected output existing on disk.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::errors::PreviewError;
use crate::utils::now_millis;

/// Convert the slide package into a page-description document:
/// `soffice --headless --convert-to pdf --outdir <dir> <input>`.
pub async fn slides_to_pdf(
    soffice: &str,
    input: &Path,
    outdir: &Path,
    limit: Duration,
) -> Result<PathBuf, PreviewError> {
    let mut cmd = Command::new(soffice);
    cmd.arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(outdir)
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = run_bounded(cmd, soffice, limit).await?;
    if !output.status.success() {
        return Err(PreviewError::ConversionProcess(format!(
            "{} exited with {}: {}",
            soffice,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let expected = outdir
        .join(input.file_stem().unwrap_or_default())
        .with_extension("pdf");
    if !expected.is_file() {
        return Err(PreviewError::ConversionProcess(format!(
            "{} reported success but {} is missing",
            soffice,
            expected.display()
        )));
    }
    debug!(pdf = %expected.display(), "primary conversion done");
    Ok(expected)
}

/// Rasterize the page-description document, one PNG per page in page
/// order: `pdftoppm -png -r <dpi> <pdf> <prefix>`.
pub async fn pdf_to_pages(
    pdftoppm: &str,
    pdf: &Path,
    dpi: u32,
    scratch: &Path,
    limit: Duration,
) -> Result<Vec<PathBuf>, PreviewError> {
    let prefix = scratch.join(format!("page-{}", now_millis()));

    let mut cmd = Command::new(pdftoppm);
    cmd.arg("-png")
        .arg("-r")
        .arg(dpi.to_string())
        .arg(pdf)
        .arg(&prefix)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = run_bounded(cmd, pdftoppm, limit).await?;
    if !output.status.success() {
        return Err(PreviewError::ConversionProcess(format!(
            "{} exited with {}: {}",
            pdftoppm,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let pages = collect_pages(scratch, &prefix)?;
    if pages.is_empty() {
        return Err(PreviewError::ConversionProcess(format!(
            "{} produced no page images",
            pdftoppm
        )));
    }
    debug!(pages = pages.len(), "secondary conversion done");
    Ok(pages)
}

async fn run_bounded(
    mut cmd: Command,
    bin: &str,
    limit: Duration,
) -> Result<std::process::Output, PreviewError> {
    let child = cmd
        .spawn()
        .map_err(|e| PreviewError::ConversionProcess(format!("could not start {}: {}", bin, e)))?;
    match timeout(limit, child.wait_with_output()).await {
        Ok(done) => done
            .map_err(|e| PreviewError::ConversionProcess(format!("{} i/o failed: {}", bin, e))),
        // kill_on_drop orphan-kills the converter; no partial results.
        Err(_) => Err(PreviewError::ConversionTimeout(limit)),
    }
}

/// Gather `<prefix>-<page>.png` outputs and order them by page number
/// (pdftoppm zero-pads, so lexical order is not reliable across widths).
fn collect_pages(scratch: &Path, prefix: &Path) -> Result<Vec<PathBuf>, PreviewError> {
    let stem = prefix
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut pages: Vec<(u32, PathBuf)> = Vec::new();
    let entries = std::fs::read_dir(scratch)
        .map_err(|e| PreviewError::ConversionProcess(format!("scratch unreadable: {}", e)))?;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        let Some(rest) = name.strip_prefix(&stem) else {
            continue;
        };
        let Some(number) = rest
            .strip_prefix('-')
            .and_then(|r| r.strip_suffix(".png"))
            .and_then(|r| r.parse::<u32>().ok())
        else {
            continue;
        };
        pages.push((number, path));
    }
    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}
