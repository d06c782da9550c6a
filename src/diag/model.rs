// src/diag/model.rs

use std::fmt;
use std::path::PathBuf;

/// Kind of a diagnostic as reported by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Error,
    Warning,
    MandatoryWarning,
    Note,
    Other,
}

impl DiagnosticKind {
    /// Parse the kind word a processor prints (`error`, `warning`, ...).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "error" | "fatal error" => DiagnosticKind::Error,
            "warning" => DiagnosticKind::Warning,
            "mandatory warning" | "mandatory_warning" => DiagnosticKind::MandatoryWarning,
            "note" => DiagnosticKind::Note,
            _ => DiagnosticKind::Other,
        }
    }

    /// Severity of the marker emitted for this kind, if any.
    pub fn marker(self) -> Option<MarkerSeverity> {
        match self {
            DiagnosticKind::Error => Some(MarkerSeverity::Error),
            DiagnosticKind::Warning | DiagnosticKind::MandatoryWarning => {
                Some(MarkerSeverity::Warning)
            }
            DiagnosticKind::Note | DiagnosticKind::Other => None,
        }
    }
}

/// A diagnostic as produced by the processor.
///
/// `source` is `None` for messages not tied to a file; those are never
/// reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub source: Option<PathBuf>,
    pub line: u64,
    pub column: u64,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, source: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            source,
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    pub fn at(mut self, line: u64, column: u64) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// Severity of a reported marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarkerSeverity {
    Warning,
    Error,
}

impl fmt::Display for MarkerSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerSeverity::Warning => f.write_str("warning"),
            MarkerSeverity::Error => f.write_str("error"),
        }
    }
}

/// A diagnostic ready to report: attributed to a file that downstream tools
/// can find (the persistent output tree, not staging).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedDiagnostic {
    pub severity: MarkerSeverity,
    pub file: PathBuf,
    pub line: u64,
    pub column: u64,
    pub message: String,
}

impl fmt::Display for RemappedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.severity,
            self.message
        )
    }
}
