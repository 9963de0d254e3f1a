// src/types/mod.rs
//! Validated domain values: object IDs and integration tokens.

use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::ApiKey;
pub use ids::NotionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}
