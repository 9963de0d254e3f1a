// src/formatting/rich_text/mod.rs
//! Renders sequences of inline text runs into Markdown.
//!
//! A run is rendered in three steps: base content, then the link wrap
//! (with the href percent-decoded once), then annotation wraps.

mod annotations;

pub use annotations::{Annotation, MarkdownStyleRenderer};

use crate::model::{InlineTextRun, RunKind};
use percent_encoding::percent_decode_str;

/// Renders a run sequence by concatenating each decorated run in order.
pub fn render_inline(runs: &[InlineTextRun]) -> String {
    runs.iter().map(decorate).collect()
}

/// Renders a single run with its link and annotations applied.
pub fn decorate(run: &InlineTextRun) -> String {
    let content = base_content(run);
    let linked = match &run.href {
        Some(href) => format!("[{}]({})", content, decode_href(href)),
        None => content,
    };
    MarkdownStyleRenderer::apply_styles(linked, &run.annotations)
}

fn base_content(run: &InlineTextRun) -> String {
    match run.kind {
        RunKind::Equation => format!("$`{}`$", run.content),
        RunKind::Text | RunKind::Mention => run.content.clone(),
    }
}

fn decode_href(href: &str) -> String {
    percent_decode_str(href).decode_utf8_lossy().into_owned()
}
