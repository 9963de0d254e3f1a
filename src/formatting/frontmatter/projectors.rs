// src/formatting/frontmatter/projectors.rs
//! One projection per supported property kind.
//!
//! A projector turns the typed value of a property into a frontmatter
//! value. Kinds without a projector (title, formula, relation, ...) are not
//! exported.

use super::yaml::{escape_frontmatter_value, FrontmatterValue};
use crate::error::ProjectionError;
use crate::model::{plain_text, Asset, InlineTextRun, PropertyValue};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

pub type Projector = fn(&str, &PropertyValue) -> Result<FrontmatterValue, ProjectionError>;

/// Looks up the projector for a Notion property kind.
pub fn projector_for(kind: &str) -> Option<Projector> {
    let projector: Projector = match kind {
        "file" | "external" => hosted_url,
        "emoji" => emoji,
        "multi_select" => multi_select,
        "select" => select,
        "people" => people,
        "files" => files,
        "phone_number" | "email" | "url" => plain_string,
        "number" => number,
        "checkbox" => checkbox,
        "date" => date,
        "rich_text" => rich_text,
        _ => return None,
    };
    Some(projector)
}

fn shape_error(name: &str, property: &PropertyValue, reason: impl Into<String>) -> ProjectionError {
    ProjectionError::UnexpectedShape {
        name: name.to_string(),
        kind: property.kind.clone(),
        reason: reason.into(),
    }
}

fn array<'a>(name: &str, property: &'a PropertyValue) -> Result<Option<&'a Vec<Value>>, ProjectionError> {
    match property.value() {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items)),
        _ => Err(shape_error(name, property, "expected an array")),
    }
}

fn string<'a>(name: &str, property: &'a PropertyValue, value: &'a Value) -> Result<Option<&'a str>, ProjectionError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(shape_error(name, property, "expected a string")),
    }
}

fn names(name: &str, property: &PropertyValue, strict: bool) -> Result<FrontmatterValue, ProjectionError> {
    let Some(items) = array(name, property)? else {
        return Ok(FrontmatterValue::Null);
    };
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item.get("name").and_then(Value::as_str) {
            Some(n) => names.push(n.to_string()),
            None if strict => return Err(shape_error(name, property, "option without a name")),
            None => {}
        }
    }
    Ok(FrontmatterValue::List(names))
}

fn hosted_url(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    match property.value() {
        Value::Null => Ok(FrontmatterValue::Null),
        value => string(name, property, &value["url"])
            .map(FrontmatterValue::text_or_null),
    }
}

fn emoji(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    string(name, property, property.value()).map(FrontmatterValue::text_or_null)
}

fn multi_select(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    names(name, property, true)
}

fn select(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    match property.value() {
        Value::Null => Ok(FrontmatterValue::Null),
        option => {
            let option_name = string(name, property, &option["name"])?;
            Ok(option_name.map_or(FrontmatterValue::Null, |n| {
                FrontmatterValue::Text(escape_frontmatter_value(n))
            }))
        }
    }
}

/// Partial users carry no name; they are skipped.
fn people(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    names(name, property, false)
}

fn files(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    let Some(items) = array(name, property)? else {
        return Ok(FrontmatterValue::Null);
    };
    let urls = items
        .iter()
        .map(|item| {
            Asset::deserialize(item)
                .map(|asset| asset.file.or(asset.external).map(|r| r.url))
                .map_err(|e| shape_error(name, property, e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FrontmatterValue::List(urls.into_iter().flatten().collect()))
}

fn plain_string(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    string(name, property, property.value()).map(FrontmatterValue::text_or_null)
}

fn number(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    match property.value() {
        Value::Null => Ok(FrontmatterValue::Null),
        Value::Number(n) => Ok(FrontmatterValue::Number(n.clone())),
        _ => Err(shape_error(name, property, "expected a number")),
    }
}

fn checkbox(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    match property.value() {
        Value::Null => Ok(FrontmatterValue::Null),
        Value::Bool(flag) => Ok(FrontmatterValue::Text(flag.to_string())),
        _ => Err(shape_error(name, property, "expected a boolean")),
    }
}

/// Only the start of a range is exported; end and time zone are dropped.
fn date(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    let start = match property.value() {
        Value::Null => return Ok(FrontmatterValue::Null),
        value => string(name, property, &value["start"])?,
    };
    let Some(start) = start else {
        return Ok(FrontmatterValue::Null);
    };
    format_date(start)
        .map(FrontmatterValue::Text)
        .ok_or_else(|| shape_error(name, property, format!("unparseable date '{}'", start)))
}

fn format_date(raw: &str) -> Option<String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S %z").to_string())
}

fn rich_text(name: &str, property: &PropertyValue) -> Result<FrontmatterValue, ProjectionError> {
    if property.value().is_null() {
        return Ok(FrontmatterValue::Null);
    }
    let runs = InlineTextRun::parse_array(property.value())
        .map_err(|e| shape_error(name, property, e.to_string()))?;
    let text = plain_text(&runs);
    if text.trim().is_empty() {
        return Ok(FrontmatterValue::Null);
    }
    Ok(FrontmatterValue::Text(escape_frontmatter_value(&text)))
}
