//! Tabular dataset handle bound into the sandbox.
//!
//! Parsing stays inside the interpreter bootstrap; the host only validates
//! the handle and tells csv from excel by extension.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Csv,
    Excel,
}

#[derive(Debug, Clone)]
pub struct DatasetHandle {
    pub path: PathBuf,
    pub name: String,
    pub kind: DatasetKind,
}

impl DatasetHandle {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            bail!("dataset file '{}' does not exist", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            kind: kind_of(&path),
            path,
            name,
        })
    }
}

fn kind_of(path: &Path) -> DatasetKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "xls" | "xlsx" => DatasetKind::Excel,
        // Anything else is attempted as csv, matching the upload fallback.
        _ => DatasetKind::Csv,
    }
}
