// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.
//!
//! Each annotation flag maps to one wrapping transform. Transforms are
//! folded over the content in declared order, so `bold + italic` always
//! yields `***x***` with the italic markers outermost.

use crate::model::Annotations;

/// A single styling flag a run can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
    Color,
}

impl Annotation {
    /// Order in which wraps are applied; later entries wrap earlier ones.
    pub const DECLARED_ORDER: [Annotation; 6] = [
        Annotation::Bold,
        Annotation::Italic,
        Annotation::Strikethrough,
        Annotation::Underline,
        Annotation::Code,
        Annotation::Color,
    ];

    /// Whether the run's annotation set has this flag turned on.
    pub fn is_set(self, annotations: &Annotations) -> bool {
        match self {
            Annotation::Bold => annotations.bold,
            Annotation::Italic => annotations.italic,
            Annotation::Strikethrough => annotations.strikethrough,
            Annotation::Underline => annotations.underline,
            Annotation::Code => annotations.code,
            Annotation::Color => annotations.color != "default",
        }
    }

    /// Wraps content in this annotation's Markdown form.
    pub fn wrap(self, content: &str) -> String {
        match self {
            Annotation::Bold => format!("**{}**", content),
            Annotation::Italic => format!("*{}*", content),
            Annotation::Strikethrough => format!("~~{}~~", content),
            Annotation::Underline => format!("<u>{}</u>", content),
            Annotation::Code => format!("`{}`", content),
            // Markdown has no portable color syntax.
            Annotation::Color => content.to_string(),
        }
    }
}

/// Renderer for annotation sets to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Applies every set annotation to the content, in declared order.
    pub fn apply_styles(content: String, annotations: &Annotations) -> String {
        Annotation::DECLARED_ORDER
            .iter()
            .filter(|annotation| annotation.is_set(annotations))
            .fold(content, |styled, annotation| annotation.wrap(&styled))
    }
}
