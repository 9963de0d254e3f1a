// src/model/rich_text.rs
//! Inline text runs: the rich-text segments inside a block.

use serde::Deserialize;
use serde_json::Value;

/// What a run's content represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Text,
    Equation,
    /// Any other run type (mentions and future additions); rendered as its
    /// plain text.
    Mention,
}

/// Styling flags attached to a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

/// One segment of rich text with its own link and annotation state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRun")]
pub struct InlineTextRun {
    pub kind: RunKind,
    pub content: String,
    pub href: Option<String>,
    pub annotations: Annotations,
}

#[derive(Deserialize)]
struct RawRun {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    annotations: Annotations,
}

impl From<RawRun> for InlineTextRun {
    fn from(raw: RawRun) -> Self {
        let kind = match raw.kind.as_str() {
            "equation" => RunKind::Equation,
            "mention" => RunKind::Mention,
            _ => RunKind::Text,
        };
        Self {
            kind,
            content: raw.plain_text,
            href: raw.href,
            annotations: raw.annotations,
        }
    }
}

impl InlineTextRun {
    /// A plain, unannotated text run.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: RunKind::Text,
            content: content.into(),
            href: None,
            annotations: Annotations::default(),
        }
    }

    /// An inline equation run.
    pub fn equation(expression: impl Into<String>) -> Self {
        Self {
            kind: RunKind::Equation,
            ..Self::text(expression)
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Parses a JSON array of Notion rich-text objects.
    pub fn parse_array(value: &Value) -> Result<Vec<Self>, serde_json::Error> {
        Vec::<Self>::deserialize(value)
    }
}

/// Concatenates the plain text of a run sequence, ignoring decoration.
pub fn plain_text(runs: &[InlineTextRun]) -> String {
    runs.iter().map(|run| run.content.as_str()).collect()
}
