//! Artifact bookkeeping for produced chart images.
//!
//! The store records where each conversation turn's visual output landed and
//! keeps a "most recent" pointer across turns. It never touches the files
//! themselves: paths can go stale on disk and consumers drop them lazily.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::utils::now_millis;

#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub produced_at: u128,
}

#[derive(Debug, Default)]
pub struct ArtifactStore {
    by_turn: HashMap<u64, Artifact>,
    most_recent: Option<Artifact>,
    /// Every distinct path ever saved, in first-seen order. Backs the
    /// gallery, which must never show the same file twice.
    seen: Vec<PathBuf>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a saved artifact. With a turn id the keyed entry is replaced
    /// (last write per key wins); without one only `most_recent` moves.
    pub fn put(&mut self, turn_id: Option<u64>, path: impl Into<PathBuf>) {
        let path = path.into();
        let artifact = Artifact {
            path: path.clone(),
            produced_at: now_millis(),
        };
        if !self.seen.contains(&path) {
            self.seen.push(path.clone());
        }
        if let Some(turn) = turn_id {
            debug!(turn, path = %path.display(), "artifact recorded");
            self.by_turn.insert(turn, artifact.clone());
        } else {
            debug!(path = %path.display(), "artifact recorded (no turn)");
        }
        self.most_recent = Some(artifact);
    }

    pub fn get(&self, turn_id: u64) -> Option<&Path> {
        self.by_turn.get(&turn_id).map(|a| a.path.as_path())
    }

    pub fn most_recent(&self) -> Option<&Path> {
        self.most_recent.as_ref().map(|a| a.path.as_path())
    }

    /// Full record behind the `most_recent` pointer.
    pub fn latest(&self) -> Option<&Artifact> {
        self.most_recent.as_ref()
    }

    /// Unique saved paths in first-seen order.
    pub fn all_unique(&self) -> &[PathBuf] {
        &self.seen
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Scratch file path `<producer>-<millis>.png`. The producer prefix tells
/// execution, conversion and fallback output apart when inspecting the
/// scratch directory.
pub fn scratch_file(dir: &Path, producer: &str) -> PathBuf {
    dir.join(format!("{}-{}.png", producer, now_millis()))
}
