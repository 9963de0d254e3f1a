// src/formatting/frontmatter/yaml.rs
//! Frontmatter values and their YAML text form.

use crate::constants::FRONTMATTER_FENCE;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;

/// `": "` starts a mapping and `"- "` starts a sequence entry.
static YAML_SIGNIFICANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r": |-\s").expect("YAML pattern regex is valid"));

/// Quotes a value that YAML would otherwise misread.
///
/// Values containing `": "` or a dash followed by whitespace are wrapped in
/// double quotes with embedded double quotes escaped; everything else is
/// returned unchanged.
pub fn escape_frontmatter_value(value: &str) -> String {
    if YAML_SIGNIFICANT.is_match(value) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    Null,
    Bool(bool),
    Number(Number),
    /// Emitted verbatim; callers sanitize beforehand where required.
    Text(String),
    List(Vec<String>),
}

impl FrontmatterValue {
    pub fn text_or_null(value: Option<&str>) -> Self {
        value.map_or(Self::Null, |v| Self::Text(v.to_string()))
    }

    /// Blank values are dropped from custom properties.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    fn to_yaml(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Number(number) => Some(number.to_string()),
            Self::Text(text) if text.is_empty() => Some("\"\"".to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::List(items) => {
                let quoted: Vec<String> = items
                    .iter()
                    .map(|item| format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\"")))
                    .collect();
                Some(format!("[{}]", quoted.join(", ")))
            }
        }
    }
}

/// Serializes key/value pairs as a `---`-fenced YAML block.
pub fn serialize(entries: &IndexMap<String, FrontmatterValue>) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|(key, value)| match value.to_yaml() {
            Some(yaml) => format!("{}: {}", key, yaml),
            None => format!("{}:", key),
        })
        .collect();

    format!(
        "{fence}\n{body}\n{fence}\n",
        fence = FRONTMATTER_FENCE,
        body = lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitizer() {
        assert_eq!(escape_frontmatter_value("Title: Subtitle"), "\"Title: Subtitle\"");
        assert_eq!(escape_frontmatter_value("plain value"), "plain value");
        assert_eq!(escape_frontmatter_value("- item"), "\"- item\"");
        assert_eq!(
            escape_frontmatter_value("Say: \"hi\""),
            "\"Say: \\\"hi\\\"\""
        );
        assert_eq!(escape_frontmatter_value("no-space-dashes"), "no-space-dashes");
        assert_eq!(
            escape_frontmatter_value("Title with \"double quotes\""),
            "Title with \"double quotes\""
        );
    }

    #[test]
    fn test_blank_values() {
        assert!(FrontmatterValue::Null.is_blank());
        assert!(FrontmatterValue::Text("  ".to_string()).is_blank());
        assert!(FrontmatterValue::List(vec![]).is_blank());
        assert!(!FrontmatterValue::Bool(false).is_blank());
        assert!(!FrontmatterValue::Number(Number::from(0)).is_blank());
    }

    #[test]
    fn test_serialize_block() {
        let mut entries = IndexMap::new();
        entries.insert("id".to_string(), FrontmatterValue::Text("abc".to_string()));
        entries.insert("cover".to_string(), FrontmatterValue::Null);
        entries.insert("archived".to_string(), FrontmatterValue::Bool(false));
        entries.insert(
            "tags".to_string(),
            FrontmatterValue::List(vec!["Action".to_string(), "Say \"hi\"".to_string()]),
        );
        entries.insert("title".to_string(), FrontmatterValue::Text(String::new()));

        assert_eq!(
            serialize(&entries),
            "---\nid: abc\ncover:\narchived: false\ntags: [\"Action\", \"Say \\\"hi\\\"\"]\ntitle: \"\"\n---\n"
        );
    }
}
