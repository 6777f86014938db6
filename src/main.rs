use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deckgen::cli::Cli;
use deckgen::config::Config;
use deckgen::dataset::DatasetHandle;
use deckgen::handlers;
use deckgen::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deckgen=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    // Scratch override must land before any component reads the config.
    if let Some(dir) = &args.scratch {
        std::env::set_var("SCRATCH_PATH", dir);
    }
    let cfg = Config::load();

    let Some(dataset_path) = args.dataset else {
        bail!("a dataset file is required; try `deckgen data.csv`");
    };
    let dataset = DatasetHandle::open(dataset_path)?;
    let mut session = Session::new(dataset);

    if let Some(script) = &args.script {
        handlers::repl::run_script(&mut session, &cfg, script).await?;
    } else if let Some(code) = &args.exec {
        handlers::run::run(&mut session, &cfg, code).await?;
    } else {
        handlers::repl::run_loop(&mut session, &cfg).await?;
    }

    if let Some(html) = &args.html {
        if session.preview.is_empty() {
            handlers::preview::refresh(&mut session, &cfg, false).await?;
        }
        handlers::preview::write_html(&session, html)?;
    }
    if let Some(pdf) = &args.export_pdf {
        handlers::export::export(&session, &cfg, pdf)?;
    }
    Ok(())
}
