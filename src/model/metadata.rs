// src/model/metadata.rs
//! Page and database metadata: the source of YAML frontmatter.

use super::rich_text::{plain_text, InlineTextRun};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// A page or database object, minus its content.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub id: Option<String>,
    /// Present on database objects only.
    pub title: Option<Vec<InlineTextRun>>,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub cover: Option<Asset>,
    pub icon: Option<Asset>,
    pub archived: bool,
    pub created_by: Option<PartialUser>,
    pub last_edited_by: Option<PartialUser>,
    pub url: Option<String>,
    pub properties: IndexMap<String, PropertyValue>,
}

/// A file-like union: an emoji, an externally hosted URL, or a
/// Notion-hosted file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub emoji: Option<String>,
    pub external: Option<UrlRef>,
    pub file: Option<UrlRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

impl Asset {
    /// The hosted URL, preferring an external source.
    pub fn url(&self) -> Option<&str> {
        self.external
            .as_ref()
            .or(self.file.as_ref())
            .map(|r| r.url.as_str())
    }

    /// An emoji when there is one, otherwise the hosted URL.
    pub fn glyph(&self) -> Option<&str> {
        self.emoji.as_deref().or_else(|| self.url())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PartialUser {
    pub object: Option<String>,
    pub id: Option<String>,
}

/// One entry of a page's `properties` map.
///
/// `kind` is the declared Notion property type; `fields` keeps every other
/// key of the property object, so the typed value lives at `fields[kind]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub kind: String,
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawProperty {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProperty::deserialize(deserializer)?;
        Ok(Self {
            kind: raw.kind,
            fields: raw.fields,
        })
    }
}

impl PropertyValue {
    pub fn new(kind: impl Into<String>, value: Value) -> Self {
        let kind = kind.into();
        let mut fields = Map::new();
        fields.insert(kind.clone(), value);
        Self { kind, fields }
    }

    /// The typed value stored under the property's own kind.
    pub fn value(&self) -> &Value {
        self.fields.get(&self.kind).unwrap_or(&NULL)
    }

    fn title_runs(&self) -> Option<Vec<InlineTextRun>> {
        self.fields
            .get("title")
            .and_then(|v| InlineTextRun::parse_array(v).ok())
    }
}

impl Metadata {
    /// Parses a page or database object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Resolves the document title.
    ///
    /// Looks at the database `title`, then a `Name` property, then a
    /// property literally named `title`, then any property of kind `title`.
    pub fn title(&self) -> String {
        let runs = self
            .title
            .clone()
            .or_else(|| self.properties.get("Name").and_then(|p| p.title_runs()))
            .or_else(|| self.properties.get("title").and_then(|p| p.title_runs()))
            .or_else(|| {
                self.properties
                    .values()
                    .find(|p| p.kind == "title")
                    .and_then(|p| p.title_runs())
            });
        runs.map(|runs| plain_text(&runs)).unwrap_or_default()
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover.as_ref().and_then(Asset::url)
    }

    pub fn icon_glyph(&self) -> Option<&str> {
        self.icon.as_ref().and_then(Asset::glyph)
    }
}
