use crate::classify::BlockType;
use crate::error::Result;
use crate::inline::tokenize;
use crate::node::Node;

/// Tokenize inline markdown into the leaf nodes that render it.
pub fn text_to_children(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize(text)?.into_iter().map(|s| s.into_node()).collect())
}

/// Convert one classified block into its HTML subtree.
pub fn block_to_node(block: &str, block_type: BlockType) -> Result<Node> {
    match block_type {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading(level) => heading(block, level),
        BlockType::CodeFence => Ok(code_fence(block)),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => list(block, "ul", |line| line.strip_prefix("- ").unwrap_or(line)),
        BlockType::OrderedList => list(block, "ol", |line| {
            line.split_once(". ").map_or(line, |(_, rest)| rest)
        }),
    }
}

fn paragraph(block: &str) -> Result<Node> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(Node::parent("p", text_to_children(&text)?))
}

fn heading(block: &str, level: u8) -> Result<Node> {
    // The prefix is `level` ASCII '#' characters and a space.
    let text = block.get(level as usize + 1..).unwrap_or("");
    Ok(Node::parent(format!("h{}", level), text_to_children(text)?))
}

/// Fenced code is emitted verbatim; inline markup is not applied.
fn code_fence(block: &str) -> Node {
    let lines: Vec<&str> = block.split('\n').collect();
    let inner: &[&str] = if lines.len() > 2 { &lines[1..lines.len() - 1] } else { &[] };
    let mut code = inner.join("\n");
    if !inner.is_empty() {
        code.push('\n');
    }
    Node::parent("pre", vec![Node::parent("code", vec![Node::text(code)])])
}

fn quote(block: &str) -> Result<Node> {
    let text = block
        .split('\n')
        .map(|line| {
            line.strip_prefix("> ")
                .or_else(|| line.strip_prefix('>'))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Node::parent("blockquote", text_to_children(&text)?))
}

fn list<F>(block: &str, tag: &str, item_text: F) -> Result<Node>
where
    F: Fn(&str) -> &str,
{
    let items = block
        .split('\n')
        .map(|line| -> Result<Node> {
            Ok(Node::parent("li", text_to_children(item_text(line))?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent(tag, items))
}
