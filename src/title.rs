use crate::error::{MarkdownError, Result};
use crate::normalize::normalize_newlines;
use regex::Regex;
use std::sync::LazyLock;

static RE_H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^# (.+)$").unwrap());

/// Return the text of the first `# ` heading line, trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    let text = normalize_newlines(markdown);
    text.split('\n')
        .find_map(|line| {
            RE_H1
                .captures(line.trim())
                .map(|caps| caps[1].trim().to_string())
        })
        .ok_or(MarkdownError::NoHeadingFound)
}
