// src/api/client.rs
//! Blocking HTTP client for the Notion REST API.
//!
//! Handles authentication, URL construction and transport. Response bodies
//! are handed to [`super::parser`] untouched.

use super::parser::{parse_blocks_page, parse_metadata, parse_pages_page};
use super::{DatabaseQuery, NotionRepository, Paginated};
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_API_VERSION};
use crate::error::AppError;
use crate::model::{Block, Metadata, PageRef};
use crate::types::ApiKey;
use reqwest::blocking::{Client, Response};
use reqwest::{header, StatusCode};
use serde::Serialize;
use url::Url;

/// A raw API response: body text plus where it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// A thin wrapper around a blocking reqwest client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a client for the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against another API root (a proxy or a mock server).
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| AppError::MissingConfiguration(format!("Invalid API base URL: {}", e)))?;
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Resolves an endpoint path against the API root.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::MalformedResponse(format!("Invalid endpoint {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Makes a GET request.
    pub fn get(&self, url: Url) -> Result<ApiResponse<String>, AppError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;
        Self::read(response, url)
    }

    /// Makes a POST request with a JSON body.
    pub fn post<T: Serialize>(&self, url: Url, body: &T) -> Result<ApiResponse<String>, AppError> {
        log::debug!("POST {}", url);
        let response = self.client.post(url.clone()).json(body).send()?;
        Self::read(response, url)
    }

    fn read(response: Response, url: Url) -> Result<ApiResponse<String>, AppError> {
        let status = response.status();
        let data = response.text()?;
        log::debug!("{} -> {} ({} bytes)", url, status, data.len());
        Ok(ApiResponse {
            data,
            status,
            url: url.to_string(),
        })
    }
}

impl NotionRepository for NotionHttpClient {
    fn fetch_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, AppError> {
        let page_size = NOTION_API_PAGE_SIZE.to_string();
        let mut query = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        let url = self.endpoint(&format!("blocks/{}/children", block_id), &query)?;
        parse_blocks_page(self.get(url)?)
    }

    fn fetch_metadata(&self, page_id: &str) -> Result<Metadata, AppError> {
        let url = self.endpoint(&format!("pages/{}", page_id), &[])?;
        parse_metadata(self.get(url)?)
    }

    fn fetch_database_pages(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<Paginated<PageRef>, AppError> {
        let url = self.endpoint(&format!("databases/{}/query", database_id), &[])?;
        parse_pages_page(self.post(url, &query.request_body(cursor))?)
    }
}
