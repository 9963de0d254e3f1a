// src/diagnostics.rs
//! Where recovered, non-fatal problems get reported.
//!
//! Skipped blocks and dropped properties never fail a conversion; they are
//! handed to a `Diagnostics` collaborator instead. The CLI forwards them to
//! the `log` facade, tests usually discard or record them.

use std::sync::Mutex;

/// Receives informational messages about content that was skipped.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
}

/// Forwards every message to `log::info!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn info(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn info(&self, _message: &str) {}
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages received so far.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
