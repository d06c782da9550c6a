// src/diag/mod.rs

//! Processor diagnostics: the data model, remapping from staging paths to
//! persistent paths, and the sink they are reported to.

pub mod collector;
pub mod model;
pub mod remap;
pub mod sink;

pub use collector::DiagnosticCollector;
pub use model::{Diagnostic, DiagnosticKind, MarkerSeverity, RemappedDiagnostic};
pub use remap::{normalize_path, remap, remap_path};
pub use sink::{DiagnosticSink, LogSink};
