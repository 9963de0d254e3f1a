// src/formatting/node.rs
//! The rendered document tree and its recursive Markdown walk.
//!
//! A node's layout behaviour is a pure function of its own kind: the
//! separator written after it and whether it indents its own lines. Nothing
//! is patched after construction.

use super::block_renderer::RenderContext;
use crate::constants::{BLOCK_SEPARATOR, INDENT_UNIT, ITEM_SEPARATOR};
use crate::model::Block;

/// The three groupable list flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
    ToDo,
}

impl ListKind {
    /// Order in which the normalizer collapses runs.
    pub const GROUPING_ORDER: [ListKind; 3] = [ListKind::Bulleted, ListKind::Numbered, ListKind::ToDo];

    /// Block type of the items this list holds.
    pub fn item_type(self) -> &'static str {
        match self {
            ListKind::Bulleted => "bulleted_list_item",
            ListKind::Numbered => "numbered_list_item",
            ListKind::ToDo => "to_do",
        }
    }

    pub fn from_item_type(block_type: &str) -> Option<Self> {
        Self::GROUPING_ORDER
            .into_iter()
            .find(|kind| kind.item_type() == block_type)
    }
}

/// Layout knobs of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Paragraphs, headings and every other standalone block.
    Ordinary,
    /// A list item or table row; its container supplies the blank lines.
    Item,
    List(ListKind),
    Table,
}

impl NodeKind {
    pub fn of_block_type(block_type: &str) -> Self {
        if block_type == "table" {
            NodeKind::Table
        } else if block_type == "table_row" || ListKind::from_item_type(block_type).is_some() {
            NodeKind::Item
        } else {
            NodeKind::Ordinary
        }
    }

    /// Written after the node's own fragment, before its children.
    pub fn separator(self) -> &'static str {
        match self {
            NodeKind::Item => ITEM_SEPARATOR,
            NodeKind::Ordinary | NodeKind::List(_) | NodeKind::Table => BLOCK_SEPARATOR,
        }
    }

    /// Containers prefix every line they emit themselves, so their parent
    /// must not prefix them again.
    pub fn indents_own_lines(self) -> bool {
        matches!(self, NodeKind::List(_) | NodeKind::Table)
    }
}

/// One node of the document tree after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    /// A raw block with its resolved children.
    Block { block: Block, children: Vec<BlockNode> },
    /// Synthetic container for a run of same-typed list items.
    List { kind: ListKind, items: Vec<BlockNode> },
    /// A table block with its rows.
    Table { block: Block, rows: Vec<BlockNode> },
}

fn indent(depth: usize) -> String {
    INDENT_UNIT.repeat(depth)
}

impl BlockNode {
    /// A node without children.
    pub fn leaf(block: Block) -> Self {
        Self::with_children(block, Vec::new())
    }

    /// Wraps a block and its already-normalized children.
    pub fn with_children(block: Block, children: Vec<BlockNode>) -> Self {
        if block.block_type == "table" {
            BlockNode::Table {
                block,
                rows: children,
            }
        } else {
            BlockNode::Block { block, children }
        }
    }

    pub fn list(kind: ListKind, items: Vec<BlockNode>) -> Self {
        BlockNode::List { kind, items }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            BlockNode::Block { block, .. } => NodeKind::of_block_type(&block.block_type),
            BlockNode::List { kind, .. } => NodeKind::List(*kind),
            BlockNode::Table { .. } => NodeKind::Table,
        }
    }

    /// Type tag used for grouping: the block type, or the container's
    /// synthetic name.
    pub fn node_type(&self) -> &str {
        match self {
            BlockNode::Block { block, .. } | BlockNode::Table { block, .. } => &block.block_type,
            BlockNode::List { kind, .. } => match kind {
                ListKind::Bulleted => "bulleted_list",
                ListKind::Numbered => "numbered_list",
                ListKind::ToDo => "to_do_list",
            },
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            BlockNode::Block { block, .. } | BlockNode::Table { block, .. } => Some(block),
            BlockNode::List { .. } => None,
        }
    }

    pub fn children(&self) -> &[BlockNode] {
        match self {
            BlockNode::Block { children, .. } => children,
            BlockNode::List { items, .. } => items,
            BlockNode::Table { rows, .. } => rows,
        }
    }

    /// Renders this node and its subtree at the given nesting depth.
    ///
    /// Returns `None` when the node contributes nothing: an unsupported or
    /// malformed block, or a container whose every item was skipped.
    pub fn to_markdown(&self, depth: usize, ctx: &RenderContext) -> Option<String> {
        self.render_indexed(depth, None, ctx)
    }

    fn render_indexed(
        &self,
        depth: usize,
        index: Option<usize>,
        ctx: &RenderContext,
    ) -> Option<String> {
        match self {
            BlockNode::Block { block, children } => {
                render_block(block, children, self.kind(), depth, index, ctx)
            }
            BlockNode::List { kind, items } => render_list(*kind, items, depth, ctx),
            BlockNode::Table { block, rows } => render_table(block, rows, depth, ctx),
        }
    }
}

/// Renders a block through the registry, reporting and swallowing failures.
fn render_own(block: &Block, index: Option<usize>, ctx: &RenderContext) -> Option<String> {
    match ctx.renderer.render(block, index) {
        Ok(Some(fragment)) => Some(fragment),
        Ok(None) => {
            ctx.diagnostics.info(&format!(
                "{} type not supported. Skipped block {}.",
                block.block_type, block.id
            ));
            None
        }
        Err(e) => {
            ctx.diagnostics.info(&format!("Skipped block {}: {}", block.id, e));
            None
        }
    }
}

fn render_block(
    block: &Block,
    children: &[BlockNode],
    kind: NodeKind,
    depth: usize,
    index: Option<usize>,
    ctx: &RenderContext,
) -> Option<String> {
    let mut output = render_own(block, index, ctx)?;
    output.push_str(kind.separator());

    for child in children {
        let Some(fragment) = child.to_markdown(depth + 1, ctx) else {
            continue;
        };
        if fragment.is_empty() {
            continue;
        }
        if !child.kind().indents_own_lines() {
            output.push_str(&indent(depth + 1));
        }
        output.push_str(&fragment);
    }

    Some(output)
}

fn render_list(
    kind: ListKind,
    items: &[BlockNode],
    depth: usize,
    ctx: &RenderContext,
) -> Option<String> {
    let prefix = indent(depth);
    let mut output = String::new();

    for (position, item) in items.iter().enumerate() {
        let index = (kind == ListKind::Numbered).then_some(position + 1);
        if let Some(fragment) = item.render_indexed(depth, index, ctx) {
            output.push_str(&prefix);
            output.push_str(&fragment);
        }
    }

    if output.is_empty() {
        return None;
    }
    if depth == 0 {
        output.push_str(ITEM_SEPARATOR);
    }
    Some(output)
}

fn render_table(
    block: &Block,
    rows: &[BlockNode],
    depth: usize,
    ctx: &RenderContext,
) -> Option<String> {
    let rendered: Vec<(&Block, String)> = rows
        .iter()
        .filter_map(|row| {
            let row_block = row.block()?;
            render_own(row_block, None, ctx).map(|line| (row_block, line))
        })
        .collect();

    let (header_block, _) = rendered.first()?;
    let prefix = indent(depth);
    let mut output = String::new();

    for (position, (_, line)) in rendered.iter().enumerate() {
        output.push_str(&prefix);
        output.push_str(line);
        output.push_str(ITEM_SEPARATOR);

        if position == 0 && block.flag("has_column_header") {
            let columns = header_block
                .payload
                .get("cells")
                .and_then(|cells| cells.as_array())
                .map_or(0, Vec::len);
            output.push_str(&prefix);
            output.push('|');
            output.push_str(&"---|".repeat(columns));
            output.push_str(ITEM_SEPARATOR);
        }
    }

    if depth == 0 {
        output.push_str(ITEM_SEPARATOR);
    }
    Some(output)
}
