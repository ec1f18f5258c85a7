use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) .+").unwrap());

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    CodeFence,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Paragraph => write!(f, "paragraph"),
            BlockType::Heading(level) => write!(f, "heading{}", level),
            BlockType::CodeFence => write!(f, "code"),
            BlockType::Quote => write!(f, "quote"),
            BlockType::UnorderedList => write!(f, "unordered_list"),
            BlockType::OrderedList => write!(f, "ordered_list"),
        }
    }
}

/// Classify a trimmed block. The first matching rule wins; anything that
/// matches no rule is a paragraph.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.split('\n').collect();
    let first = lines[0];
    let last = lines[lines.len() - 1];

    if let Some(caps) = RE_HEADING.captures(first) {
        return BlockType::Heading(caps[1].len() as u8);
    }
    if lines.len() >= 2 && first.starts_with(FENCE) && last.ends_with(FENCE) {
        return BlockType::CodeFence;
    }
    if lines.iter().all(|l| l.starts_with('>')) {
        return BlockType::Quote;
    }
    if lines.iter().all(|l| l.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if is_ordered_list(&lines) {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

/// Line `i` must start with `"{i + 1}. "`.
fn is_ordered_list(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}
