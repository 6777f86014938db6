//! Gallery of produced artifacts (unique paths, first-seen order).

use owo_colors::OwoColorize;

use crate::session::Session;

pub fn list(session: &Session) {
    let unique = session.store.all_unique();
    if unique.is_empty() {
        println!("no artifacts yet; run code that produces a plot");
        return;
    }
    for (i, path) in unique.iter().enumerate() {
        let status = if path.is_file() {
            "ok".green().to_string()
        } else {
            "missing".red().to_string()
        };
        let latest = if session.store.most_recent() == Some(path.as_path()) {
            " (latest)"
        } else {
            ""
        };
        println!("{:>3}. [{}] {}{}", i + 1, status, path.display(), latest);
    }
    if let Some(artifact) = session.store.latest() {
        println!("latest saved at {} ms", artifact.produced_at);
    }
}
