// src/output/writer.rs
//! Carries out an [`OutputPlan`]: writes page and row documents, creates
//! the database output directory, or prints to stdout.

use super::types::{DeliveryTarget, OutputPlan, OutputReport};
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers every target of `plan` in order.
///
/// A target that fails (an unwritable row file, say) is recorded and the
/// remaining rows are still written; callers decide whether a partial
/// delivery is an error.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let started = Instant::now();
    let mut report = OutputReport::new();
    log::info!(
        "Delivering {} document(s) to {} target(s)",
        plan.document_count(),
        plan.operations.len()
    );

    for target in plan.operations {
        match apply(&target) {
            Ok(bytes) => {
                log::debug!("Delivered {} bytes to {}", bytes, target);
                report.record_success(target, bytes);
            }
            Err(e) => {
                log::error!("Could not deliver to {}: {}", target, e);
                report.record_failure(target, e.to_string());
            }
        }
    }

    report.elapsed_ms = started.elapsed().as_millis() as u64;
    log::info!(
        "Delivery finished: {} ok, {} failed, {} bytes in {}ms",
        report.delivered.len(),
        report.failures.len(),
        report.bytes_written,
        report.elapsed_ms
    );
    Ok(report)
}

fn apply(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_document(path, content),
        DeliveryTarget::CreateDirectory { path } => ensure_directory(path).map(|_| 0),
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(content.len())
        }
    }
}

fn write_document(path: &Path, content: &str) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(content.len())
}

/// An existing directory is fine; an existing file in its place is not.
fn ensure_directory(path: &Path) -> Result<(), AppError> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}
