// src/diag/sink.rs

use std::path::Path;

use tracing::{debug, error, warn};

use crate::diag::model::{MarkerSeverity, RemappedDiagnostic};

/// Where diagnostics end up: the host build's view of problems per file.
///
/// A batch build just logs; an IDE-aware host would keep markers per file,
/// which is why stale ones must be clearable.
pub trait DiagnosticSink: Send {
    fn add_diagnostic(&mut self, diagnostic: &RemappedDiagnostic);

    /// Forget everything previously reported against `file`.
    fn clear_diagnostics(&mut self, file: &Path);

    /// `directory` has new content the host should pick up.
    fn refresh(&mut self, directory: &Path);
}

/// Sink for command-line builds: diagnostics go to the log, clearing is a
/// no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn add_diagnostic(&mut self, d: &RemappedDiagnostic) {
        match d.severity {
            MarkerSeverity::Error => error!(
                file = %d.file.display(),
                line = d.line,
                column = d.column,
                "{}",
                d.message
            ),
            MarkerSeverity::Warning => warn!(
                file = %d.file.display(),
                line = d.line,
                column = d.column,
                "{}",
                d.message
            ),
        }
    }

    fn clear_diagnostics(&mut self, _file: &Path) {}

    fn refresh(&mut self, directory: &Path) {
        debug!(directory = ?directory, "output directory refreshed");
    }
}
