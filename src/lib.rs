pub mod blocks;
pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod inline;
pub mod node;
pub mod normalize;
pub mod site;
pub mod title;

pub use classify::BlockType;
pub use error::{MarkdownError, Result, SiteError};
pub use inline::Span;
pub use node::Node;
pub use title::extract_title;

use tracing::{debug, trace};

/// Parse a markdown document into a `<div>` tree with one child per block.
pub fn parse(markdown: &str) -> Result<Node> {
    let blocks = blocks::segment(markdown);
    debug!(blocks = blocks.len(), "segmented document");

    if blocks.is_empty() {
        return Ok(Node::parent("div", vec![Node::leaf("p", "")]));
    }

    let mut children = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let block_type = classify::classify(block);
        trace!(%block_type, "classified block");
        children.push(emit::block_to_node(block, block_type)?);
    }
    Ok(Node::parent("div", children))
}

pub fn markdown_to_html(markdown: &str) -> Result<String> {
    parse(markdown)?.render()
}
