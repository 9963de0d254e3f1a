// src/api/tree_builder.rs
//! Recursively assembles the normalized block tree of a page.

use super::pagination::collect_all_pages;
use super::NotionRepository;
use crate::constants::permits_children;
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::AppError;
use crate::formatting::{normalize, BlockNode};
use crate::model::Block;

/// Walks a page depth-first, fetching the children of every block whose
/// type permits nesting.
///
/// Each subtree is fully resolved before its next sibling is visited and
/// every sibling level is normalized before it is returned.
pub struct TreeBuilder<'a, R: NotionRepository + ?Sized> {
    repository: &'a R,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, R: NotionRepository + ?Sized> TreeBuilder<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            diagnostics: &NoopDiagnostics,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Builds the sibling sequence under `root_id`.
    ///
    /// Any fetch failure aborts the whole build.
    pub fn build(&self, root_id: &str) -> Result<Vec<BlockNode>, AppError> {
        let blocks =
            collect_all_pages(|cursor| self.repository.fetch_children(root_id, cursor))?;
        log::debug!("Fetched {} blocks under {}", blocks.len(), root_id);

        let nodes = blocks
            .into_iter()
            .map(|block| self.assemble(block))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(normalize(nodes))
    }

    fn assemble(&self, block: Block) -> Result<BlockNode, AppError> {
        if !block.has_children {
            return Ok(BlockNode::leaf(block));
        }
        if !permits_children(&block.block_type) {
            self.diagnostics.info(&format!(
                "Children of {} block {} are not rendered.",
                block.block_type, block.id
            ));
            return Ok(BlockNode::leaf(block));
        }

        let children = self.build(&block.id)?;
        Ok(BlockNode::with_children(block, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DatabaseQuery, Paginated};
    use crate::diagnostics::RecordingDiagnostics;
    use crate::model::{Metadata, PageRef};
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned children, two blocks per page, and records every call.
    #[derive(Default)]
    struct StubRepository {
        children: HashMap<String, Vec<Block>>,
        calls: RefCell<Vec<(String, Option<String>)>>,
    }

    impl StubRepository {
        fn with(mut self, parent: &str, blocks: Vec<Block>) -> Self {
            self.children.insert(parent.to_string(), blocks);
            self
        }
    }

    impl NotionRepository for StubRepository {
        fn fetch_children(
            &self,
            block_id: &str,
            cursor: Option<&str>,
        ) -> Result<Paginated<Block>, AppError> {
            self.calls
                .borrow_mut()
                .push((block_id.to_string(), cursor.map(str::to_string)));
            let all = self.children.get(block_id).cloned().ok_or_else(|| {
                AppError::MalformedResponse(format!("no children for {}", block_id))
            })?;
            let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
            let end = (start + 2).min(all.len());
            let page = all[start..end].to_vec();
            Ok(if end < all.len() {
                Paginated::with_more(page, end.to_string())
            } else {
                Paginated::last(page)
            })
        }

        fn fetch_metadata(&self, _page_id: &str) -> Result<Metadata, AppError> {
            Ok(Metadata::default())
        }

        fn fetch_database_pages(
            &self,
            _database_id: &str,
            _query: &DatabaseQuery,
            _cursor: Option<&str>,
        ) -> Result<Paginated<PageRef>, AppError> {
            Ok(Paginated::last(Vec::new()))
        }
    }

    fn block(id: &str, block_type: &str, has_children: bool) -> Block {
        Block::new(id, block_type, has_children, json!({ "rich_text": [] }))
    }

    #[test]
    fn test_paginates_and_normalizes() {
        let repo = StubRepository::default().with(
            "root",
            vec![
                block("h", "heading_1", false),
                block("b1", "bulleted_list_item", false),
                block("b2", "bulleted_list_item", false),
                block("p", "paragraph", false),
                block("b3", "bulleted_list_item", false),
            ],
        );

        let tree = TreeBuilder::new(&repo).build("root").unwrap();
        let types: Vec<_> = tree.iter().map(BlockNode::node_type).collect();
        assert_eq!(types, ["heading_1", "bulleted_list", "paragraph", "bulleted_list"]);
        assert_eq!(
            repo.calls.borrow().clone(),
            vec![
                ("root".to_string(), None),
                ("root".to_string(), Some("2".to_string())),
                ("root".to_string(), Some("4".to_string())),
            ]
        );
    }

    #[test]
    fn test_recurses_only_into_permitted_types() {
        let diagnostics = RecordingDiagnostics::new();
        let repo = StubRepository::default()
            .with(
                "root",
                vec![block("t", "to_do", true), block("g", "toggle", true)],
            )
            .with("t", vec![block("tc", "paragraph", false)]);

        let tree = TreeBuilder::new(&repo)
            .with_diagnostics(&diagnostics)
            .build("root")
            .unwrap();

        assert_eq!(tree.len(), 2);
        let todo_item = &tree[0].children()[0];
        assert_eq!(todo_item.children().len(), 1);
        assert!(tree[1].children().is_empty());
        assert_eq!(
            diagnostics.messages(),
            vec!["Children of toggle block g are not rendered."]
        );
        let fetched: Vec<_> = repo.calls.borrow().iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(fetched, ["root", "t"]);
    }

    #[test]
    fn test_child_fetch_failure_aborts() {
        let repo = StubRepository::default().with("root", vec![block("p", "paragraph", true)]);
        let result = TreeBuilder::new(&repo).build("root");
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
