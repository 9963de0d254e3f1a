// src/model/block.rs
//! A single Notion block as returned by the children endpoint.

use super::rich_text::InlineTextRun;
use crate::error::RenderError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One node of a Notion document tree.
///
/// The type-specific object (the value stored under the key named by
/// `type` in the API response) is kept verbatim as `payload`; each block
/// renderer reads only the fields it needs from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub block_type: String,
    pub has_children: bool,
    pub payload: Value,
}

#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = RawBlock::deserialize(deserializer)?;
        let payload = raw.rest.remove(&raw.block_type).unwrap_or(Value::Null);
        Ok(Block {
            id: raw.id,
            block_type: raw.block_type,
            has_children: raw.has_children,
            payload,
        })
    }
}

impl Block {
    pub fn new(
        id: impl Into<String>,
        block_type: impl Into<String>,
        has_children: bool,
        payload: Value,
    ) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            has_children,
            payload,
        }
    }

    /// Looks up a payload field, failing when it is absent or null.
    pub fn field(&self, name: &'static str) -> Result<&Value, RenderError> {
        match self.payload.get(name) {
            Some(Value::Null) | None => Err(self.missing(name)),
            Some(value) => Ok(value),
        }
    }

    /// A payload field that must be a string.
    pub fn str_field(&self, name: &'static str) -> Result<&str, RenderError> {
        self.field(name)?
            .as_str()
            .ok_or_else(|| self.invalid(format!("'{}' is not a string", name)))
    }

    /// A payload field holding an array of rich-text objects.
    pub fn rich_text(&self, name: &'static str) -> Result<Vec<InlineTextRun>, RenderError> {
        let value = self.field(name)?;
        InlineTextRun::parse_array(value)
            .map_err(|e| self.invalid(format!("'{}' is not rich text: {}", name, e)))
    }

    /// Whether a boolean payload flag is set; absent counts as false.
    pub fn flag(&self, name: &str) -> bool {
        self.payload
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn missing(&self, field: &'static str) -> RenderError {
        RenderError::MissingField {
            block_id: self.id.clone(),
            block_type: self.block_type.clone(),
            field,
        }
    }

    pub fn invalid(&self, reason: impl Into<String>) -> RenderError {
        RenderError::InvalidPayload {
            block_id: self.id.clone(),
            block_type: self.block_type.clone(),
            reason: reason.into(),
        }
    }
}
