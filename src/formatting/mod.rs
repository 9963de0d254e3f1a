// src/formatting/mod.rs
//! Renders a normalized block tree and page metadata into Markdown.

pub mod block_renderer;
pub mod frontmatter;
pub mod node;
pub mod normalizer;
pub mod rich_text;

pub use block_renderer::{BlockRenderer, RenderContext, RenderFn};
pub use frontmatter::{escape_frontmatter_value, project_frontmatter};
pub use node::{BlockNode, ListKind, NodeKind};
pub use normalizer::normalize;
pub use rich_text::{decorate, render_inline};

use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::Metadata;

/// Concatenates the top-level renderings in source order.
pub fn render_body(nodes: &[BlockNode], ctx: &RenderContext) -> String {
    let mut body = String::with_capacity(nodes.len() * CHARS_PER_BLOCK_ESTIMATE);
    for fragment in nodes.iter().filter_map(|node| node.to_markdown(0, ctx)) {
        body.push_str(&fragment);
    }
    log::debug!("Rendered {} top-level nodes into {} bytes", nodes.len(), body.len());
    body
}

/// Assembles a whole document: frontmatter (or nothing), a newline, the body.
pub fn compose_document(
    metadata: Option<&Metadata>,
    nodes: &[BlockNode],
    ctx: &RenderContext,
) -> String {
    let frontmatter = metadata
        .map(|metadata| project_frontmatter(metadata, ctx.diagnostics))
        .unwrap_or_default();
    format!("{}\n{}", frontmatter, render_body(nodes, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text_block(block_type: &str, text: &str) -> Block {
        Block::new(
            text,
            block_type,
            false,
            json!({ "rich_text": [{ "type": "text", "plain_text": text }] }),
        )
    }

    fn nodes(blocks: Vec<Block>) -> Vec<BlockNode> {
        normalize(blocks.into_iter().map(BlockNode::leaf).collect())
    }

    #[test]
    fn test_heading_bold_and_list() {
        let bold = json!({
            "type": "text",
            "plain_text": "bold",
            "annotations": { "bold": true }
        });
        let tree = nodes(vec![
            text_block("heading_1", "Heading 1"),
            Block::new("p", "paragraph", false, json!({ "rich_text": [bold] })),
            text_block("bulleted_list_item", "x"),
            text_block("bulleted_list_item", "y"),
        ]);

        assert_eq!(
            render_body(&tree, &RenderContext::default()),
            "# Heading 1\n\n**bold**\n\n- x\n- y\n\n"
        );
    }

    #[test]
    fn test_unsupported_block_leaves_no_trace() {
        let tree = nodes(vec![
            text_block("paragraph", "one"),
            Block::new("u", "unknown_x", false, json!({})),
            text_block("paragraph", "two"),
        ]);
        assert_eq!(render_body(&tree, &RenderContext::default()), "one\n\ntwo\n\n");
    }

    #[test]
    fn test_document_without_frontmatter() {
        let tree = nodes(vec![text_block("quote", "q")]);
        assert_eq!(compose_document(None, &tree, &RenderContext::default()), "\n> q\n\n");
    }

    #[test]
    fn test_document_with_frontmatter() {
        let metadata = Metadata::from_value(json!({ "id": "p1", "archived": true })).unwrap();
        let document = compose_document(Some(&metadata), &[], &RenderContext::default());
        assert!(document.starts_with("---\nid: p1\n"));
        assert!(document.ends_with("archived: true\ncreated_by_object:\ncreated_by_id:\nlast_edited_by_object:\nlast_edited_by_id:\n---\n\n"));
    }
}
