// src/pipeline.rs
//! The conversion pipeline: fetch the tree, render it, prepend frontmatter.
//!
//! `Converter` is the library's front door. It owns a repository and the
//! collaborators every render pass needs, and exposes page and database
//! conversion on top of them.

use crate::api::{collect_all_pages, DatabaseQuery, NotionRepository, TreeBuilder};
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::AppError;
use crate::formatting::{compose_document, BlockNode, BlockRenderer, RenderContext};
use std::sync::Arc;

/// One converted database row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPage {
    pub page_id: String,
    pub markdown: String,
}

/// Converts Notion pages and databases to Markdown documents.
pub struct Converter<R> {
    repository: R,
    renderer: BlockRenderer,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<R: NotionRepository> Converter<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            renderer: BlockRenderer::new(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    /// Routes skipped-block and dropped-property reports to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Replaces the block type registry.
    pub fn with_renderer(mut self, renderer: BlockRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.renderer, self.diagnostics.as_ref())
    }

    /// Fetches and normalizes the block tree under `root_id`.
    pub fn build_tree(&self, root_id: &str) -> Result<Vec<BlockNode>, AppError> {
        TreeBuilder::new(&self.repository)
            .with_diagnostics(self.diagnostics.as_ref())
            .build(root_id)
    }

    /// Converts one page into a Markdown document.
    ///
    /// Metadata is fetched only when frontmatter is requested. Any fetch
    /// failure fails the whole conversion.
    pub fn convert(&self, root_id: &str, include_frontmatter: bool) -> Result<String, AppError> {
        log::info!("Converting {}", root_id);

        let metadata = if include_frontmatter {
            Some(self.repository.fetch_metadata(root_id)?)
        } else {
            None
        };
        let nodes = self.build_tree(root_id)?;

        Ok(compose_document(metadata.as_ref(), &nodes, &self.context()))
    }

    /// Converts every row of a database, in the order the query returns them.
    pub fn export_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
        include_frontmatter: bool,
    ) -> Result<Vec<ExportedPage>, AppError> {
        let pages = collect_all_pages(|cursor| {
            self.repository
                .fetch_database_pages(database_id, query, cursor)
        })?;
        log::info!("Database {} returned {} page(s)", database_id, pages.len());

        pages
            .into_iter()
            .map(|page| {
                let markdown = self.convert(&page.id, include_frontmatter)?;
                Ok(ExportedPage {
                    page_id: page.id,
                    markdown,
                })
            })
            .collect()
    }

    /// Like [`Converter::export_database`], keeping only the documents.
    pub fn convert_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
        include_frontmatter: bool,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .export_database(database_id, query, include_frontmatter)?
            .into_iter()
            .map(|page| page.markdown)
            .collect())
    }
}
