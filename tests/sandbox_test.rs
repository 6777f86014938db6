use anyhow::Result;
use deckgen::sandbox::{merge_report, parse_report};

#[test]
fn report_line_is_parsed_and_prefix_preserved() {
    let raw = concat!(
        "direct-fd-noise\n",
        "DECKGEN-REPORT {\"stdout\":\"hello\\n\",\"error\":null,",
        "\"artifact\":null,\"artifact_error\":null}\n",
    );
    let (pre, report) = parse_report(raw).expect("report should parse");
    assert_eq!(pre, "direct-fd-noise");
    assert_eq!(report.stdout, "hello\n");

    let result = merge_report(&pre, report);
    assert_eq!(result.stdout_text, "direct-fd-noise\nhello\n");
    assert!(result.error_text.is_none());
    assert!(result.artifact_path.is_none());
}

#[test]
fn error_and_artifact_can_both_be_present() {
    // Code that raises after opening a figure still yields both.
    let raw = concat!(
        "DECKGEN-REPORT {\"stdout\":\"\",\"error\":\"Traceback: boom\",",
        "\"artifact\":\"/tmp/exec-1.png\",\"artifact_error\":null}\n",
    );
    let (pre, report) = parse_report(raw).unwrap();
    let result = merge_report(&pre, report);
    assert_eq!(result.error_text.as_deref(), Some("Traceback: boom"));
    assert_eq!(
        result.artifact_path.as_deref(),
        Some(std::path::Path::new("/tmp/exec-1.png"))
    );
}

#[test]
fn save_failure_is_appended_not_merged() {
    let raw = concat!(
        "DECKGEN-REPORT {\"stdout\":\"x\",\"error\":\"Traceback: boom\",",
        "\"artifact\":null,\"artifact_error\":\"disk full\"}\n",
    );
    let (pre, report) = parse_report(raw).unwrap();
    let result = merge_report(&pre, report);
    let err = result.error_text.unwrap();
    assert!(err.starts_with("Traceback: boom"));
    assert!(err.contains("Additionally failed saving artifact: disk full"));
}

#[test]
fn save_failure_alone_still_reports() {
    let raw = concat!(
        "DECKGEN-REPORT {\"stdout\":\"\",\"error\":null,",
        "\"artifact\":null,\"artifact_error\":\"kaleido missing\"}\n",
    );
    let (pre, report) = parse_report(raw).unwrap();
    let result = merge_report(&pre, report);
    assert_eq!(
        result.error_text.as_deref(),
        Some("Failed saving artifact: kaleido missing")
    );
}

#[test]
fn missing_marker_means_no_report() {
    assert!(parse_report("plain output without a marker\n").is_none());
    assert!(parse_report("DECKGEN-REPORT not-json\n").is_none());
}

/// End-to-end smoke against a real interpreter; skipped on hosts without
/// python3 + pandas + matplotlib.
#[tokio::test]
async fn sandbox_runs_real_python_when_available() -> Result<()> {
    let probe = std::process::Command::new("python3")
        .args(["-c", "import pandas, matplotlib"])
        .output();
    match probe {
        Ok(out) if out.status.success() => {}
        _ => {
            println!("Warning: python3 with pandas/matplotlib not available; skipping");
            return Ok(());
        }
    }

    use deckgen::artifacts::ArtifactStore;
    use deckgen::config::Config;
    use deckgen::dataset::DatasetHandle;
    use deckgen::sandbox::{ExecutionRequest, Sandbox};

    let dir = tempfile::tempdir()?;
    let csv = dir.path().join("data.csv");
    std::fs::write(&csv, "x,y\n1,2\n3,4\n5,6\n")?;
    // Each test file is its own process, so the env override is safe here.
    std::env::set_var("SCRATCH_PATH", dir.path().join("scratch"));

    let cfg = Config::load();
    let sandbox = Sandbox::from_config(&cfg);
    let mut store = ArtifactStore::new();

    let request = ExecutionRequest {
        code: concat!(
            "print('rows', len(df))\n",
            "plt.plot(df['x'], df['y'])\n",
        )
        .to_string(),
        dataset: DatasetHandle::open(&csv)?,
        turn_id: Some(1),
    };
    let result = sandbox.execute(&request, &mut store).await?;

    assert!(result.stdout_text.contains("rows 3"));
    assert!(result.error_text.is_none(), "unexpected error: {:?}", result.error_text);
    let artifact = result.artifact_path.expect("open figure should be saved");
    assert!(artifact.is_file());
    assert_eq!(store.get(1), Some(artifact.as_path()));
    assert_eq!(store.most_recent(), Some(artifact.as_path()));
    Ok(())
}
