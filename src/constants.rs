// src/constants.rs
//! Domain constants that define how a Notion tree becomes Markdown.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Root of every REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Value of the `Notion-Version` header sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Environment variable consulted when no `--token` flag is given.
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

// ---------------------------------------------------------------------------
// Tree structure
// ---------------------------------------------------------------------------

/// Block types whose nested children are fetched and rendered.
///
/// Every other type is treated as a leaf even when the API reports
/// `has_children`.
pub const PERMITTED_CHILDREN_TYPES: [&str; 5] = [
    "bulleted_list_item",
    "numbered_list_item",
    "paragraph",
    "to_do",
    "table",
];

/// Whether a block of this type may own nested blocks.
pub fn permits_children(block_type: &str) -> bool {
    PERMITTED_CHILDREN_TYPES.contains(&block_type)
}

// ---------------------------------------------------------------------------
// Markdown layout
// ---------------------------------------------------------------------------

/// One level of nesting in the rendered output.
pub const INDENT_UNIT: &str = "\t";

/// Rendered in place of an empty paragraph.
pub const BLANK_PARAGRAPH: &str = "<br />";

/// Separator after an ordinary block.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Separator after a list item or table row; the enclosing container
/// supplies the blank line around the whole group.
pub const ITEM_SEPARATOR: &str = "\n";

/// Fence delimiting YAML frontmatter.
pub const FRONTMATTER_FENCE: &str = "---";

// ---------------------------------------------------------------------------
// Capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per rendered block, used to pre-allocate output.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 64;
