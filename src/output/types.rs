// src/output/types.rs
//! What a conversion run delivers, and how the delivery went.
//!
//! A page run produces a single document, and a database run produces one
//! document per row plus the directory that holds them. Planning describes
//! those destinations as [`DeliveryTarget`]s. The writer then fills an
//! [`OutputReport`] that the binary turns into its exit status.

use std::fmt;
use std::path::PathBuf;

/// Destinations for the documents of one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    /// Number of Markdown documents the plan carries.
    pub fn document_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| !matches!(op, DeliveryTarget::CreateDirectory { .. }))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryTarget {
    /// A page document (`--output <file>`) or one database row
    /// (`<dir>/<page-id>.md`); parent directories are created.
    WriteFile { path: PathBuf, content: String },
    /// The `--output` directory of a database run.
    CreateDirectory { path: PathBuf },
    /// Documents printed when no `--output` was given.
    PrintToStdout { content: String },
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::WriteFile { path, .. } => write!(f, "file {}", path.display()),
            DeliveryTarget::CreateDirectory { path } => {
                write!(f, "directory {}", path.display())
            }
            DeliveryTarget::PrintToStdout { .. } => write!(f, "stdout"),
        }
    }
}

/// Outcome of one plan. Failures do not stop the remaining targets.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub delivered: Vec<Delivered>,
    pub failures: Vec<DeliveryFailure>,
    pub bytes_written: usize,
    pub elapsed_ms: u64,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, target: DeliveryTarget, bytes: usize) {
        self.bytes_written += bytes;
        self.delivered.push(Delivered { target, bytes });
    }

    pub fn record_failure(&mut self, target: DeliveryTarget, error: String) {
        self.failures.push(DeliveryFailure { target, error });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One `"<target>: <error>"` line per failed target.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|failure| format!("{}: {}", failure.target, failure.error))
            .collect()
    }

    /// Markdown files that made it to disk.
    pub fn written_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.delivered.iter().filter_map(|d| match &d.target {
            DeliveryTarget::WriteFile { path, .. } => Some(path),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Delivered {
    pub target: DeliveryTarget,
    pub bytes: usize,
}

#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    pub target: DeliveryTarget,
    pub error: String,
}
