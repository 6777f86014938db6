//! Sandboxed execution of externally supplied analysis code.
//!
//! One request runs one code block in a fresh interpreter subprocess. The
//! process boundary is the isolation mechanism: the bootstrap restricts
//! which names the code sees and a wall-clock timeout bounds the run, but
//! CPU/memory/filesystem limits are deliberately not imposed here.

pub mod bootstrap;

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::artifacts::{scratch_file, ArtifactStore};
use crate::config::Config;
use crate::dataset::DatasetHandle;
use crate::errors::SandboxError;

/// One run-button click. Not persisted.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub code: String,
    pub dataset: DatasetHandle,
    pub turn_id: Option<u64>,
}

/// Immutable once returned.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub stdout_text: String,
    pub error_text: Option<String>,
    pub artifact_path: Option<PathBuf>,
}

/// Typed report the bootstrap emits on its marker line.
#[derive(Debug, Clone, Deserialize)]
pub struct SandboxReport {
    pub stdout: String,
    pub error: Option<String>,
    pub artifact: Option<PathBuf>,
    pub artifact_error: Option<String>,
}

pub struct Sandbox {
    python: String,
    scratch: PathBuf,
    timeout: Duration,
}

impl Sandbox {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            python: cfg.python_bin(),
            scratch: cfg.scratch_path(),
            timeout: cfg.exec_timeout(),
        }
    }

    /// Execute one block of code against the bound dataset.
    ///
    /// Errors raised by the code are reported inside the result, never as
    /// `Err`; `Err` means the host could not run the interpreter at all.
    /// On a successful artifact save the store is updated under the
    /// request's turn id (the `most_recent` pointer moves regardless).
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
        store: &mut ArtifactStore,
    ) -> Result<ExecutionResult, SandboxError> {
        std::fs::create_dir_all(&self.scratch)?;
        let code_file = tempfile::Builder::new()
            .prefix("code-")
            .suffix(".py")
            .tempfile_in(&self.scratch)?;
        std::fs::write(code_file.path(), &request.code)?;
        let (_, code_path) = code_file.keep().map_err(|e| e.error)?;

        let artifact_target = scratch_file(&self.scratch, "exec");

        let mut cmd = Command::new(&self.python);
        cmd.arg("-u")
            .arg("-c")
            .arg(bootstrap::BOOTSTRAP)
            .env(bootstrap::ENV_DATASET, &request.dataset.path)
            .env(bootstrap::ENV_CODE, &code_path)
            .env(bootstrap::ENV_ARTIFACT, &artifact_target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| SandboxError::Spawn {
            bin: self.python.clone(),
            source,
        })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(waited) => waited?,
            // kill_on_drop reaps the interpreter when the future is dropped.
            Err(_) => {
                return Ok(ExecutionResult {
                    stdout_text: String::new(),
                    error_text: Some(format!(
                        "execution timed out after {}s",
                        self.timeout.as_secs()
                    )),
                    artifact_path: None,
                })
            }
        };

        let raw_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let raw_stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(status = %output.status, "sandbox exited");

        let mut result = match parse_report(&raw_stdout) {
            Some((pre, report)) => merge_report(&pre, report),
            None => {
                // The interpreter died before the bootstrap could report
                // (missing libraries, hard crash). Surface what we have.
                let detail = if raw_stderr.trim().is_empty() {
                    format!("interpreter exited with {} and produced no report", output.status)
                } else {
                    raw_stderr.trim_end().to_string()
                };
                ExecutionResult {
                    stdout_text: raw_stdout,
                    error_text: Some(detail),
                    artifact_path: None,
                }
            }
        };

        result.artifact_path = match result.artifact_path.take() {
            Some(path) if path.is_file() => {
                store.put(request.turn_id, path.clone());
                Some(path)
            }
            Some(_) => {
                append_error(
                    &mut result.error_text,
                    "artifact file missing after reported save",
                );
                None
            }
            None => None,
        };
        Ok(result)
    }
}

/// Split the child's real stdout into pre-marker text (raw fd writes that
/// bypassed the capture buffer) and the parsed report line.
pub fn parse_report(raw_stdout: &str) -> Option<(String, SandboxReport)> {
    let mut found: Option<(usize, SandboxReport)> = None;
    let mut offset = 0;
    for line in raw_stdout.lines() {
        if let Some(json) = line.trim_end().strip_prefix(bootstrap::REPORT_MARKER) {
            if let Ok(report) = serde_json::from_str::<SandboxReport>(json) {
                found = Some((offset, report));
            }
        }
        offset += line.len() + 1;
    }
    found.map(|(start, report)| {
        let pre = raw_stdout[..start.min(raw_stdout.len())]
            .trim_end_matches('\n')
            .to_string();
        (pre, report)
    })
}

/// Fold a report into the caller-facing result. A failed artifact save is
/// appended to the execution error, never merged into it.
pub fn merge_report(pre: &str, report: SandboxReport) -> ExecutionResult {
    let mut stdout_text = String::new();
    if !pre.is_empty() {
        stdout_text.push_str(pre);
        stdout_text.push('\n');
    }
    stdout_text.push_str(&report.stdout);

    let mut error_text = report.error.filter(|e| !e.is_empty());
    if let Some(save_err) = report.artifact_error.filter(|e| !e.is_empty()) {
        append_error(&mut error_text, &save_err);
    }

    ExecutionResult {
        stdout_text,
        error_text,
        artifact_path: report.artifact,
    }
}

fn append_error(error_text: &mut Option<String>, save_err: &str) {
    *error_text = Some(match error_text.take() {
        Some(existing) => format!(
            "{}\nAdditionally failed saving artifact: {}",
            existing.trim_end(),
            save_err
        ),
        None => format!("Failed saving artifact: {}", save_err),
    });
}
