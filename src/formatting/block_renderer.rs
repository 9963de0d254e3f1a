// src/formatting/block_renderer.rs
//! Block rendering engine: turns one block's payload into a Markdown fragment.
//!
//! Rendering is dispatched through a registry keyed by block type. A type
//! missing from the registry yields `Ok(None)`; the caller decides what an
//! unsupported block means for the surrounding document.

use super::rich_text::render_inline;
use crate::constants::BLANK_PARAGRAPH;
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::RenderError;
use crate::model::{Asset, Block, InlineTextRun};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Renders one block. The index is the item's 1-based position when the
/// block is rendered inside a numbered list.
pub type RenderFn = fn(&Block, Option<usize>) -> Result<String, RenderError>;

static STANDARD: Lazy<BlockRenderer> = Lazy::new(BlockRenderer::new);

/// Type registry mapping block types to render functions.
#[derive(Clone)]
pub struct BlockRenderer {
    registry: HashMap<&'static str, RenderFn>,
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.registry.keys().collect();
        types.sort();
        f.debug_struct("BlockRenderer").field("types", &types).finish()
    }
}

impl BlockRenderer {
    /// The registry with every supported block type.
    pub fn new() -> Self {
        Self::empty()
            .register("paragraph", paragraph)
            .register("heading_1", heading_1)
            .register("heading_2", heading_2)
            .register("heading_3", heading_3)
            .register("quote", quote)
            .register("callout", callout)
            .register("bulleted_list_item", bulleted_list_item)
            .register("numbered_list_item", numbered_list_item)
            .register("to_do", to_do)
            .register("code", code)
            .register("embed", link_to_url)
            .register("bookmark", link_to_url)
            .register("link_preview", link_to_url)
            .register("image", image)
            .register("file", linked_file)
            .register("pdf", linked_file)
            .register("video", linked_file)
            .register("divider", divider)
            .register("equation", equation)
            .register("table_row", table_row)
    }

    /// A process-wide instance of [`BlockRenderer::new`].
    pub fn shared() -> &'static BlockRenderer {
        &STANDARD
    }

    /// A registry that knows no block types.
    pub fn empty() -> Self {
        Self {
            registry: HashMap::new(),
        }
    }

    /// Adds or replaces the render function for a block type.
    pub fn register(mut self, block_type: &'static str, render: RenderFn) -> Self {
        self.registry.insert(block_type, render);
        self
    }

    pub fn supports(&self, block_type: &str) -> bool {
        self.registry.contains_key(block_type)
    }

    /// Renders a block, returning `Ok(None)` for unregistered types.
    pub fn render(&self, block: &Block, index: Option<usize>) -> Result<Option<String>, RenderError> {
        match self.registry.get(block.block_type.as_str()) {
            Some(render) => render(block, index).map(Some),
            None => Ok(None),
        }
    }
}

/// Collaborators shared by every node during one render pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub renderer: &'a BlockRenderer,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> RenderContext<'a> {
    pub fn new(renderer: &'a BlockRenderer, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            renderer,
            diagnostics,
        }
    }
}

impl Default for RenderContext<'static> {
    fn default() -> Self {
        Self::new(BlockRenderer::shared(), &NoopDiagnostics)
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("renderer", self.renderer)
            .finish_non_exhaustive()
    }
}

// --- Payload helpers ---

fn text(block: &Block) -> Result<String, RenderError> {
    Ok(render_inline(&block.rich_text("rich_text")?))
}

/// Optional caption; absent means empty.
fn caption(block: &Block) -> Result<String, RenderError> {
    match block.payload.get("caption") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(_) => Ok(render_inline(&block.rich_text("caption")?)),
    }
}

fn asset(block: &Block, value: &Value) -> Result<Asset, RenderError> {
    Asset::deserialize(value).map_err(|e| block.invalid(format!("not a file object: {}", e)))
}

fn hosted_url(block: &Block) -> Result<String, RenderError> {
    asset(block, &block.payload)?
        .url()
        .map(str::to_string)
        .ok_or_else(|| block.missing("url"))
}

// --- Per-type renderers ---

fn paragraph(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let runs = block.rich_text("rich_text")?;
    if runs.is_empty() {
        return Ok(BLANK_PARAGRAPH.to_string());
    }
    Ok(render_inline(&runs))
}

fn heading_1(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("# {}", text(block)?))
}

fn heading_2(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("## {}", text(block)?))
}

fn heading_3(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("### {}", text(block)?))
}

fn quote(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("> {}", text(block)?))
}

fn callout(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let text = text(block)?;
    let icon = match block.payload.get("icon") {
        None | Some(Value::Null) => None,
        Some(value) => asset(block, value)?.glyph().map(str::to_string),
    };
    Ok(match icon {
        Some(icon) => format!("{} {}", icon, text),
        None => text,
    })
}

fn bulleted_list_item(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("- {}", text(block)?))
}

fn numbered_list_item(block: &Block, index: Option<usize>) -> Result<String, RenderError> {
    match index {
        Some(index) => Ok(format!("{}. {}", index, text(block)?)),
        None => bulleted_list_item(block, None),
    }
}

fn to_do(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let marker = if block.flag("checked") { "[x]" } else { "[ ]" };
    Ok(format!("- {} {}", marker, text(block)?))
}

fn code(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let language = match block.payload.get("language").and_then(Value::as_str) {
        Some("plain text") => "text",
        Some(language) => language,
        None => "",
    };
    Ok(format!("```{}\n{}\n```", language, text(block)?))
}

fn link_to_url(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let url = block.str_field("url")?;
    Ok(format!("[{}]({})", url, url))
}

fn image(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("![]({})\n\n{}", hosted_url(block)?, caption(block)?))
}

fn linked_file(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let url = hosted_url(block)?;
    Ok(format!("[{}]({})\n\n{}", url, url, caption(block)?))
}

fn divider(_: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok("---".to_string())
}

fn equation(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    Ok(format!("$${}$$", block.str_field("expression")?))
}

fn table_row(block: &Block, _: Option<usize>) -> Result<String, RenderError> {
    let cells = block
        .field("cells")?
        .as_array()
        .ok_or_else(|| block.invalid("'cells' is not an array"))?;

    let rendered = cells
        .iter()
        .map(|cell| {
            InlineTextRun::parse_array(cell)
                .map(|runs| render_inline(&runs))
                .map_err(|e| block.invalid(format!("cell is not rich text: {}", e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("|{}|", rendered.join("|")))
}
