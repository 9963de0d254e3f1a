// src/lib.rs
//! notion2md library: converts Notion pages and databases into Markdown
//! documents with optional YAML frontmatter.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `RenderError`, `ProjectionError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ConversionConfig`
//! - **Domain model**: `Block`, `InlineTextRun`, `Metadata`, `PageRef`
//! - **Domain types**: `NotionId`, `ApiKey`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `TreeBuilder`
//! - **Formatting**: `BlockNode`, `BlockRenderer`, `render_body`, `compose_document`
//! - **Pipeline**: `Converter`

pub mod api;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, ProjectionError, RenderError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ConversionConfig, ConversionMode};

// --- Diagnostics ---
pub use crate::diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics, RecordingDiagnostics};

// --- Domain Model ---
pub use crate::model::{Block, InlineTextRun, Metadata, PageRef, PropertyValue};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId};

// --- API Client ---
pub use crate::api::{
    collect_all_pages, DatabaseQuery, NotionHttpClient, NotionRepository, Paginated, TreeBuilder,
};

// --- Formatting ---
pub use crate::formatting::{
    compose_document, decorate, escape_frontmatter_value, normalize, project_frontmatter,
    render_body, render_inline, BlockNode, BlockRenderer, RenderContext,
};

// --- Pipeline ---
pub use crate::pipeline::{Converter, ExportedPage};
