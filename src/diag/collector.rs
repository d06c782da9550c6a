// src/diag/collector.rs

use std::sync::{Arc, Mutex};

use crate::diag::model::Diagnostic;

/// Shared, append-only diagnostic buffer handed to a processor.
///
/// The processor reports into it as it goes, so whatever was reported before
/// a failure or crash is still available to the caller afterwards.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    inner: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        // Poisoned by a panicking processor: keep what it reported.
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(diagnostic);
    }

    /// Copy of everything reported so far, in report order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn len(&self) -> usize {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
