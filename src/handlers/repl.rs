//! Interactive session loop; also drives `--script` files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::session::Session;

use super::{export, gallery, preview, run, slide};

pub async fn run_loop(session: &mut Session, cfg: &Config) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    if interactive {
        println!(
            "deckgen: dataset '{}' bound; type `help` for commands",
            session.dataset.name
        );
    }

    loop {
        if interactive {
            print!("deckgen> ");
            io::stdout().flush().ok();
        }
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }
        match dispatch(session, cfg, line.trim()).await {
            Ok(true) => break,
            Ok(false) => {}
            // Command failures never kill the session.
            Err(err) => eprintln!("{}", err.to_string().red()),
        }
    }
    Ok(())
}

/// Execute a script of REPL commands, stopping at the first failure.
pub async fn run_script(session: &mut Session, cfg: &Config, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if dispatch(session, cfg, line).await? {
            break;
        }
    }
    Ok(())
}

/// Returns `true` when the session should end.
pub async fn dispatch(session: &mut Session, cfg: &Config, line: &str) -> Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => help(),
        "run" => {
            if rest.is_empty() {
                bail!("usage: run <code-or-reply-file>");
            }
            run::run(session, cfg, &PathBuf::from(rest)).await?;
        }
        "use" => slide::select(session, rest)?,
        "slide" => {
            // slide <layout> | <title> | <body...>
            let mut parts = rest.splitn(3, '|').map(str::trim);
            let layout = parts.next().unwrap_or_default();
            let title = parts.next().unwrap_or_default();
            let body = parts.next().unwrap_or_default();
            if layout.is_empty() {
                bail!("usage: slide <layout> | <title> | <body>");
            }
            slide::add(session, layout, title, body)?;
        }
        "preview" => {
            if let Ok(n) = rest.parse::<i64>() {
                session.cursor = n;
            }
            preview::refresh(session, cfg, false).await?;
            preview::show_current(session);
        }
        "refresh" => {
            preview::refresh(session, cfg, true).await?;
            preview::show_current(session);
        }
        "next" => {
            session.cursor += 1;
            preview::show_current(session);
        }
        "prev" => {
            session.cursor -= 1;
            preview::show_current(session);
        }
        "goto" => {
            session.cursor = rest.parse().unwrap_or(session.cursor);
            preview::show_current(session);
        }
        "show" => preview::show_current(session),
        "html" => {
            if rest.is_empty() {
                bail!("usage: html <output-file>");
            }
            preview::write_html(session, &PathBuf::from(rest))?;
        }
        "gallery" => gallery::list(session),
        "export" => {
            if rest.is_empty() {
                bail!("usage: export <output.pdf>");
            }
            export::export(session, cfg, &PathBuf::from(rest))?;
        }
        "status" => status(session),
        "quit" | "exit" => return Ok(true),
        other => eprintln!("unknown command '{}'; type `help`", other),
    }
    Ok(false)
}

fn status(session: &Session) {
    println!(
        "dataset:   {} ({:?})",
        session.dataset.path.display(),
        session.dataset.kind
    );
    println!(
        "slides:    {} ({})",
        session.document.len(),
        if session.document.is_dirty() {
            "preview stale"
        } else {
            "preview current"
        }
    );
    println!("artifacts: {}", session.store.all_unique().len());
    match session.tier {
        Some(tier) => println!("preview:   {} images via {}", session.preview.len(), tier.label()),
        None => println!("preview:   not rendered yet"),
    }
}

fn help() {
    println!("commands:");
    println!("  run <file>              execute a python snippet or AI reply against the dataset");
    println!("  use <sel>               pick artifact for the next slide: latest, turn:<n>, <gallery#>, <path>, none");
    println!("  slide <layout> | <title> | <body>");
    println!("                          append a slide (layouts: text, image, side, stacked, grid)");
    println!("  preview [n]             render if stale, then show image n");
    println!("  refresh                 force a re-render");
    println!("  next / prev / goto <n>  move the viewer cursor");
    println!("  show                    print the current frame");
    println!("  html <file>             write the embeddable preview panel");
    println!("  gallery                 list produced artifacts");
    println!("  export <file.pdf>       write the PDF report");
    println!("  status                  session summary");
    println!("  quit                    end the session");
}
