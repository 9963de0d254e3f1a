// tests/common/mod.rs
//! Shared fixtures: an in-memory Notion workspace built from wire-format JSON.

#![allow(dead_code)]

use notion2md::api::{DatabaseQuery, NotionRepository, Paginated};
use notion2md::error::NotionErrorCode;
use notion2md::model::{Block, Metadata, PageRef};
use notion2md::AppError;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// How many results the fake serves per request.
pub const PAGE_SIZE: usize = 2;

/// A workspace held in memory. Children and database rows are served
/// `PAGE_SIZE` at a time so every caller exercises cursor handling.
#[derive(Default)]
pub struct FakeNotion {
    children: HashMap<String, Vec<Value>>,
    metadata: HashMap<String, Value>,
    databases: HashMap<String, Vec<String>>,
    broken: HashSet<String>,
    pub requests: RefCell<Vec<String>>,
    pub queries: RefCell<Vec<DatabaseQuery>>,
}

impl FakeNotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<Value>) -> Self {
        self.children.insert(parent.to_string(), blocks);
        self
    }

    pub fn with_metadata(mut self, page: &str, metadata: Value) -> Self {
        self.metadata.insert(page.to_string(), metadata);
        self
    }

    pub fn with_database(mut self, database: &str, pages: &[&str]) -> Self {
        self.databases.insert(
            database.to_string(),
            pages.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    /// Every request touching `id` fails with a 500.
    pub fn with_failure(mut self, id: &str) -> Self {
        self.broken.insert(id.to_string());
        self
    }

    fn check(&self, id: &str) -> Result<(), AppError> {
        self.requests.borrow_mut().push(id.to_string());
        if self.broken.contains(id) {
            return Err(AppError::NotionService {
                code: NotionErrorCode::HttpStatus(500),
                message: format!("simulated failure for {}", id),
                status: 500,
            });
        }
        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find block with ID: {}", id),
        status: 404,
    }
}

fn slice<T: Clone>(all: &[T], cursor: Option<&str>) -> Paginated<T> {
    let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
    let end = (start + PAGE_SIZE).min(all.len());
    let page = all[start.min(end)..end].to_vec();
    if end < all.len() {
        Paginated::with_more(page, end.to_string())
    } else {
        Paginated::last(page)
    }
}

impl NotionRepository for FakeNotion {
    fn fetch_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, AppError> {
        self.check(block_id)?;
        let raw = self.children.get(block_id).ok_or_else(|| not_found(block_id))?;
        let blocks = raw
            .iter()
            .map(|value| serde_json::from_value::<Block>(value.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(slice(&blocks, cursor))
    }

    fn fetch_metadata(&self, page_id: &str) -> Result<Metadata, AppError> {
        self.check(page_id)?;
        let raw = self.metadata.get(page_id).ok_or_else(|| not_found(page_id))?;
        Ok(Metadata::from_value(raw.clone())?)
    }

    fn fetch_database_pages(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<Paginated<PageRef>, AppError> {
        self.check(database_id)?;
        self.queries.borrow_mut().push(query.clone());
        let pages: Vec<PageRef> = self
            .databases
            .get(database_id)
            .ok_or_else(|| not_found(database_id))?
            .iter()
            .map(PageRef::new)
            .collect();
        Ok(slice(&pages, cursor))
    }
}

// --- Wire-format builders ---

pub fn run(text: &str) -> Value {
    json!({
        "type": "text",
        "text": { "content": text, "link": null },
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        },
        "plain_text": text,
        "href": null
    })
}

pub fn styled(text: &str, annotations: Value) -> Value {
    let mut value = run(text);
    for (key, flag) in annotations.as_object().into_iter().flatten() {
        value["annotations"][key] = flag.clone();
    }
    value
}

/// A block object as returned by `GET /blocks/{id}/children`.
pub fn block(id: &str, block_type: &str, has_children: bool, payload: Value) -> Value {
    let mut value = json!({
        "object": "block",
        "id": id,
        "type": block_type,
        "created_time": "2022-07-30T10:12:00.000Z",
        "has_children": has_children,
        "archived": false
    });
    value[block_type] = payload;
    value
}

pub fn text_block(id: &str, block_type: &str, text: &str) -> Value {
    block(id, block_type, false, json!({ "rich_text": [run(text)], "color": "default" }))
}

pub fn parent_block(id: &str, block_type: &str, text: &str) -> Value {
    block(id, block_type, true, json!({ "rich_text": [run(text)], "color": "default" }))
}

pub fn table_row(id: &str, cells: &[&str]) -> Value {
    let cells: Vec<Value> = cells.iter().map(|c| json!([run(c)])).collect();
    block(id, "table_row", false, json!({ "cells": cells }))
}

/// A page object with a `Name` title property plus `extra` properties.
pub fn page_metadata(id: &str, title: &str, extra: Value) -> Value {
    let mut properties = json!({
        "Name": { "id": "title", "type": "title", "title": [run(title)] }
    });
    for (name, property) in extra.as_object().into_iter().flatten() {
        properties[name] = property.clone();
    }
    json!({
        "object": "page",
        "id": id,
        "created_time": "2022-07-30T10:12:00.000Z",
        "last_edited_time": "2022-08-01T08:00:00.000Z",
        "created_by": { "object": "user", "id": "user-1" },
        "last_edited_by": { "object": "user", "id": "user-2" },
        "cover": null,
        "icon": { "type": "emoji", "emoji": "📘" },
        "parent": { "type": "workspace", "workspace": true },
        "archived": false,
        "properties": properties,
        "url": format!("https://www.notion.so/{}", id)
    })
}
