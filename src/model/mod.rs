// src/model/mod.rs
//! Read-only data handed to the converter by the Notion API layer.

mod block;
mod metadata;
mod rich_text;

pub use block::Block;
pub use metadata::{Asset, Metadata, PartialUser, PropertyValue, UrlRef};
pub use rich_text::{plain_text, Annotations, InlineTextRun, RunKind};

use serde::Deserialize;

/// A database row as returned by a database query; only its ID matters
/// for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRef {
    pub id: String,
}

impl PageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
