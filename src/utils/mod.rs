//! Utilities (timestamps, code-fence extraction, text clipping).

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch; used for scratch file naming.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Clip a string to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Extract runnable Python blocks from a text that may be a raw snippet or
/// an AI reply with fenced code.
///
/// If the text contains fenced blocks, every ```python/```py/untagged fence
/// whose content looks like code is returned. Without fences the whole text
/// is returned as a single block when it looks like code.
pub fn extract_python_blocks(text: &str) -> Vec<String> {
    if !text.contains("```") {
        return if looks_like_python(text) {
            vec![text.trim().to_string()]
        } else {
            Vec::new()
        };
    }

    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    let mut skipping = false;
    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("```") {
            if skipping {
                skipping = false;
            } else if let Some(lines) = current.take() {
                let block = lines.join("\n");
                if looks_like_python(&block) {
                    blocks.push(block.trim().to_string());
                }
            } else {
                let tag = rest.trim().to_ascii_lowercase();
                if tag.is_empty() || tag == "python" || tag == "py" {
                    current = Some(Vec::new());
                } else {
                    // Fence with another language tag; ignore its content.
                    skipping = true;
                }
            }
            continue;
        }
        if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }
    blocks
}

/// Heuristic mirror of "is this block actually code": any line opening with
/// an import/def/print or one of the bound plotting/data names.
fn looks_like_python(block: &str) -> bool {
    const MARKERS: &[&str] = &[
        "import ", "from ", "def ", "class ", "print(", "plt.", "sns.", "pd.", "np.", "fig ",
        "fig=", "df.", "df[",
    ];
    block.lines().any(|line| {
        let t = line.trim_start();
        MARKERS.iter().any(|m| t.starts_with(m))
    })
}
