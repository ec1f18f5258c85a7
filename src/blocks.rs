use crate::normalize::{is_blank, normalize_newlines};

/// Split a document into blocks separated by blank lines.
///
/// Any run of blank lines is one separator. Each block is trimmed and empty
/// blocks are dropped, so a blank document yields no blocks.
pub fn segment(markdown: &str) -> Vec<String> {
    let text = normalize_newlines(markdown);
    let mut blocks: Vec<String> = Vec::new();
    let mut buf: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_blank(line) {
            flush(&mut buf, &mut blocks);
        } else {
            buf.push(line);
        }
    }
    flush(&mut buf, &mut blocks);

    blocks
}

fn flush(buf: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if buf.is_empty() {
        return;
    }
    let block = buf.join("\n");
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
    buf.clear();
}
