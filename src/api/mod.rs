// src/api/mod.rs
//! Notion API interaction: the ability to retrieve blocks, metadata and
//! database rows.
//!
//! Conversion logic depends on the [`NotionRepository`] trait only; the HTTP
//! details live in [`client`] and [`parser`].

pub mod client;
pub mod pagination;
pub mod parser;
pub mod tree_builder;

pub use client::{ApiResponse, NotionHttpClient};
pub use pagination::{collect_all_pages, Paginated};
pub use tree_builder::TreeBuilder;

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Block, Metadata, PageRef};
use serde_json::{json, Value};

/// The ability to retrieve content from a Notion workspace, one page of
/// results at a time.
///
/// IDs are passed through exactly as Notion reported them.
pub trait NotionRepository {
    /// One page of the direct children of a block or page.
    fn fetch_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, AppError>;

    /// The metadata (properties, timestamps, cover, icon) of a page.
    fn fetch_metadata(&self, page_id: &str) -> Result<Metadata, AppError>;

    /// One page of the rows matching a database query.
    fn fetch_database_pages(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<Paginated<PageRef>, AppError>;
}

/// Optional filter and sort criteria for a database query, passed to Notion
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseQuery {
    pub filter: Option<Value>,
    pub sorts: Option<Value>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sorts(mut self, sorts: Value) -> Self {
        self.sorts = Some(sorts);
        self
    }

    /// JSON body for `POST /databases/{id}/query`.
    pub fn request_body(&self, cursor: Option<&str>) -> Value {
        let mut body = json!({ "page_size": NOTION_API_PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        if let Some(filter) = &self.filter {
            body["filter"] = filter.clone();
        }
        if let Some(sorts) = &self.sorts {
            body["sorts"] = sorts.clone();
        }
        body
    }
}
