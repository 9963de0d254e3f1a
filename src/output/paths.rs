// src/output/paths.rs
//! Pure planning: decides where converted documents go.

use super::types::{DeliveryTarget, OutputPlan};
use crate::pipeline::ExportedPage;
use std::path::Path;

/// File name for one exported database row.
pub fn page_filename(page_id: &str) -> String {
    format!("{}.md", page_id)
}

/// Page mode: the document goes to `output` when given, else to stdout.
pub fn plan_page(markdown: String, output: Option<&Path>) -> OutputPlan {
    let operation = match output {
        Some(path) => DeliveryTarget::WriteFile {
            path: path.to_path_buf(),
            content: markdown,
        },
        None => DeliveryTarget::PrintToStdout { content: markdown },
    };
    OutputPlan::new().with_operation(operation)
}

/// Database mode: one `<page-id>.md` per row inside `output`, or every
/// document on stdout separated by a blank line.
pub fn plan_database(pages: Vec<ExportedPage>, output: Option<&Path>) -> OutputPlan {
    match output {
        Some(dir) => pages.into_iter().fold(
            OutputPlan::new().with_operation(DeliveryTarget::CreateDirectory {
                path: dir.to_path_buf(),
            }),
            |plan, page| {
                plan.with_operation(DeliveryTarget::WriteFile {
                    path: dir.join(page_filename(&page.page_id)),
                    content: page.markdown,
                })
            },
        ),
        None if pages.is_empty() => OutputPlan::new(),
        None => {
            let content = pages
                .into_iter()
                .map(|page| page.markdown)
                .collect::<Vec<_>>()
                .join("\n");
            OutputPlan::new().with_operation(DeliveryTarget::PrintToStdout { content })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn exported(id: &str, markdown: &str) -> ExportedPage {
        ExportedPage {
            page_id: id.to_string(),
            markdown: markdown.to_string(),
        }
    }

    #[test]
    fn test_plan_page() {
        assert_eq!(
            plan_page("x".to_string(), None).operations,
            vec![DeliveryTarget::PrintToStdout {
                content: "x".to_string()
            }]
        );
        assert_eq!(
            plan_page("x".to_string(), Some(Path::new("out.md"))).operations,
            vec![DeliveryTarget::WriteFile {
                path: PathBuf::from("out.md"),
                content: "x".to_string()
            }]
        );
    }

    #[test]
    fn test_plan_database_into_directory() {
        let plan = plan_database(
            vec![exported("p1", "one\n"), exported("p2", "two\n")],
            Some(Path::new("rows")),
        );
        assert_eq!(
            plan.operations,
            vec![
                DeliveryTarget::CreateDirectory {
                    path: PathBuf::from("rows")
                },
                DeliveryTarget::WriteFile {
                    path: PathBuf::from("rows/p1.md"),
                    content: "one\n".to_string()
                },
                DeliveryTarget::WriteFile {
                    path: PathBuf::from("rows/p2.md"),
                    content: "two\n".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_plan_database_to_stdout() {
        let plan = plan_database(vec![exported("p1", "one\n"), exported("p2", "two\n")], None);
        assert_eq!(
            plan.operations,
            vec![DeliveryTarget::PrintToStdout {
                content: "one\n\ntwo\n".to_string()
            }]
        );
        assert!(plan_database(Vec::new(), None).operations.is_empty());
    }
}
