use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "deckgen", about = "AI-assisted slide deck assembler with live preview", version)]
#[command(group(ArgGroup::new("mode").args(["script", "exec"]).multiple(false)))]
pub struct Cli {
    /// Tabular dataset bound into the analysis sandbox (csv, xls, xlsx).
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    /// Run a command script instead of the interactive loop.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Execute one analysis file, then exit (combine with --html/--export-pdf).
    #[arg(long)]
    pub exec: Option<PathBuf>,

    /// Write the preview panel as an embeddable HTML file before exiting.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Export a PDF report before exiting.
    #[arg(long = "export-pdf")]
    pub export_pdf: Option<PathBuf>,

    /// Override the scratch directory for generated files.
    #[arg(long)]
    pub scratch: Option<PathBuf>,
}
