//! Execute an analysis file (raw snippet or AI reply with fenced code).

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::sandbox::{ExecutionRequest, Sandbox};
use crate::session::Session;
use crate::utils::extract_python_blocks;

pub async fn run(session: &mut Session, cfg: &Config, source: &Path) -> Result<()> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("could not read '{}'", source.display()))?;
    let blocks = extract_python_blocks(&text);
    if blocks.is_empty() {
        bail!("no runnable python block found in '{}'", source.display());
    }

    let sandbox = Sandbox::from_config(cfg);
    for code in blocks {
        let turn = session.next_turn();
        let request = ExecutionRequest {
            code,
            dataset: session.dataset.clone(),
            turn_id: Some(turn),
        };
        let result = sandbox.execute(&request, &mut session.store).await?;

        if !result.stdout_text.is_empty() {
            println!("{}", result.stdout_text.trim_end());
        }
        if let Some(err) = &result.error_text {
            eprintln!("{}", err.trim_end().red());
        }
        if let Some(path) = &result.artifact_path {
            println!("{} {}", "artifact saved:".green(), path.display());
            session.note_artifact(path);
        }
    }
    Ok(())
}
