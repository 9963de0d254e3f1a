// src/api/parser.rs
//! Turns raw API responses into model values or typed errors.

use super::client::ApiResponse;
use super::Paginated;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Metadata, PageRef};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error body returned by Notion alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct NotionError {
    code: String,
    message: String,
}

/// Parses a response body, or the Notion error it carries.
pub fn parse_api_response<T>(response: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if response.status.is_success() {
        parse_success(&response.data, &response.url)
    } else {
        Err(parse_error(&response.data, response.status, &response.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        let preview: String = body.chars().take(500).collect();
        AppError::MalformedResponse(format!("{} (body: {})", e, preview))
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    match serde_json::from_str::<NotionError>(body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: status.as_u16(),
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}", status, url),
            status: status.as_u16(),
        },
    }
}

pub fn parse_blocks_page(response: ApiResponse<String>) -> Result<Paginated<Block>, AppError> {
    parse_api_response(response)
}

pub fn parse_metadata(response: ApiResponse<String>) -> Result<Metadata, AppError> {
    parse_api_response(response)
}

pub fn parse_pages_page(response: ApiResponse<String>) -> Result<Paginated<PageRef>, AppError> {
    parse_api_response(response)
}
