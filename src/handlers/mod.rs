//! Command handlers driven by the REPL / script loop.

pub mod export;
pub mod gallery;
pub mod preview;
pub mod repl;
pub mod run;
pub mod slide;
