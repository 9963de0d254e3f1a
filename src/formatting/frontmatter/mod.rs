// src/formatting/frontmatter/mod.rs
//! Projects page metadata into a YAML frontmatter block.
//!
//! Custom properties are collected first; the default fields are merged on
//! top so that a default always wins a key collision.

mod projectors;
mod yaml;

pub use projectors::{projector_for, Projector};
pub use yaml::{escape_frontmatter_value, serialize, FrontmatterValue};

use crate::diagnostics::Diagnostics;
use crate::model::Metadata;
use indexmap::IndexMap;
use deunicode::deunicode_char;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Renders the complete `---`-fenced frontmatter block.
pub fn project_frontmatter(metadata: &Metadata, diagnostics: &dyn Diagnostics) -> String {
    serialize(&frontmatter_properties(metadata, diagnostics))
}

/// Every frontmatter entry in output order.
pub fn frontmatter_properties(
    metadata: &Metadata,
    diagnostics: &dyn Diagnostics,
) -> IndexMap<String, FrontmatterValue> {
    let mut properties = custom_properties(metadata, diagnostics);
    for (key, value) in default_properties(metadata) {
        properties.insert(key, value);
    }
    properties
}

/// Supported, non-blank custom properties under normalized keys.
pub fn custom_properties(
    metadata: &Metadata,
    diagnostics: &dyn Diagnostics,
) -> IndexMap<String, FrontmatterValue> {
    let mut custom = IndexMap::new();

    for (name, property) in &metadata.properties {
        let Some(project) = projector_for(&property.kind) else {
            continue;
        };
        let key = normalize_key(name);
        if key.is_empty() {
            diagnostics.info(&format!(
                "Property '{}' has no usable key. Omitted from frontmatter.",
                name
            ));
            continue;
        }

        match project(name, property) {
            Ok(value) if value.is_blank() => {}
            Ok(value) => {
                custom.insert(key, value);
            }
            Err(e) => diagnostics.info(&format!("{}. Omitted from frontmatter.", e)),
        }
    }

    custom
}

/// The fields every document carries, whatever its properties.
pub fn default_properties(metadata: &Metadata) -> IndexMap<String, FrontmatterValue> {
    let text = FrontmatterValue::text_or_null;
    let created_by = metadata.created_by.clone().unwrap_or_default();
    let last_edited_by = metadata.last_edited_by.clone().unwrap_or_default();

    IndexMap::from([
        ("id".to_string(), text(metadata.id.as_deref())),
        (
            "title".to_string(),
            FrontmatterValue::Text(escape_frontmatter_value(&metadata.title())),
        ),
        ("created_time".to_string(), text(metadata.created_time.as_deref())),
        ("cover".to_string(), text(metadata.cover_url())),
        ("icon".to_string(), text(metadata.icon_glyph())),
        (
            "last_edited_time".to_string(),
            text(metadata.last_edited_time.as_deref()),
        ),
        (
            "archived".to_string(),
            FrontmatterValue::Bool(metadata.archived),
        ),
        (
            "created_by_object".to_string(),
            text(created_by.object.as_deref()),
        ),
        ("created_by_id".to_string(), text(created_by.id.as_deref())),
        (
            "last_edited_by_object".to_string(),
            text(last_edited_by.object.as_deref()),
        ),
        (
            "last_edited_by_id".to_string(),
            text(last_edited_by.id.as_deref()),
        ),
    ])
}

/// Lower-snake-case, ASCII-folded key for a property name.
///
/// Accents are stripped, other letters are transliterated (`ß` to `ss`,
/// `Æ` to `ae`) and every run of anything else becomes one `_`.
/// `"Release Date"` becomes `release_date`, `"Café"` becomes `cafe`.
pub fn normalize_key(name: &str) -> String {
    let mut key = KeyBuilder::default();

    for c in name.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii() {
            key.push(c);
            continue;
        }
        match deunicode_char(c).filter(|_| c.is_alphabetic()) {
            Some(ascii) => ascii.chars().for_each(|a| key.push(a)),
            None => key.separate(),
        }
    }

    key.finish()
}

#[derive(Default)]
struct KeyBuilder {
    key: String,
    pending_separator: bool,
}

impl KeyBuilder {
    fn push(&mut self, c: char) {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            self.separate();
            return;
        }
        if self.pending_separator && !self.key.is_empty() {
            self.key.push('_');
        }
        self.pending_separator = false;
        self.key.push(c.to_ascii_lowercase());
    }

    fn separate(&mut self) {
        self.pending_separator = true;
    }

    fn finish(self) -> String {
        self.key
    }
}
