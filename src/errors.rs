//! Pipeline error taxonomy.
//!
//! Handlers and `main` stay on `anyhow`; these types exist where a caller
//! needs to tell failure causes apart (cascade tiers, sandbox staging).

use std::time::Duration;

use thiserror::Error;

/// Host-side sandbox failures. Errors raised *by the executed code* are not
/// errors here; they travel inside `ExecutionResult::error_text`.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to start interpreter '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// Staging the code file or reading child output failed.
    #[error("sandbox i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Tier-tagged failures inside the preview cascade. Every variant is
/// swallowed by the renderer and answered by the next tier; none of them
/// escape `PreviewRenderer::render`.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("conversion timed out after {0:?}")]
    ConversionTimeout(Duration),

    #[error("conversion failed: {0}")]
    ConversionProcess(String),

    #[error("slide synthesis failed: {0}")]
    Synthesis(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("report composition failed: {0}")]
    Compose(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
