// src/api/pagination.rs
//! Cursor-based pagination over Notion list endpoints.

use crate::error::AppError;
use serde::Deserialize;

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// A single, final page.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }

    /// A page followed by more results at `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            has_more: true,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// Fetches every page, starting without a cursor and following
/// `next_cursor` until the source reports no more results.
///
/// The first failing fetch aborts the walk and its error is returned as is.
pub fn collect_all_pages<T, F>(mut fetch: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<&str>) -> Result<Paginated<T>, AppError>,
{
    let mut all_items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch(cursor.as_deref())?;
        pages_fetched += 1;
        all_items.extend(page.results);

        match page.next_cursor {
            Some(next) if page.has_more => cursor = Some(next),
            _ => break,
        }
    }

    log::debug!(
        "Collected {} items over {} page(s)",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}
