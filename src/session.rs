//! Per-process session aggregate.
//!
//! All mutable state (the deck, the artifact map, the preview set, the
//! viewer cursor) lives here and is passed by reference into component
//! calls; there are no ambient globals. Everything runs on the one thread
//! driving the REPL. A multi-session embedding would own one `Session`
//! per user and serialize access to each; this binary assumes one.

use std::path::{Path, PathBuf};

use crate::artifacts::ArtifactStore;
use crate::dataset::DatasetHandle;
use crate::deck::Document;
use crate::preview::{PreviewImage, RenderTier};

pub struct Session {
    pub dataset: DatasetHandle,
    pub document: Document,
    pub store: ArtifactStore,
    /// Current preview set; replaced wholesale by every render.
    pub preview: Vec<PreviewImage>,
    pub tier: Option<RenderTier>,
    /// Viewer cursor, clamped by the viewer on use.
    pub cursor: i64,
    /// Artifact picked via `use ...` for the next inserted slide.
    pub pending_artifact: Option<PathBuf>,
    next_turn: u64,
}

impl Session {
    pub fn new(dataset: DatasetHandle) -> Self {
        Self {
            dataset,
            document: Document::new(),
            store: ArtifactStore::new(),
            preview: Vec::new(),
            tier: None,
            cursor: 1,
            pending_artifact: None,
            next_turn: 0,
        }
    }

    pub fn next_turn(&mut self) -> u64 {
        self.next_turn += 1;
        self.next_turn
    }

    /// A freshly saved artifact invalidates the preview when some already
    /// rendered slide references the same path.
    pub fn note_artifact(&mut self, path: &Path) {
        let referenced = self
            .document
            .slides()
            .iter()
            .any(|s| s.artifact_ref.as_deref() == Some(path));
        if referenced {
            self.document.mark_dirty();
        }
    }
}
