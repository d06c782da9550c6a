// src/exec/backend.rs

//! Pluggable processor abstraction.
//!
//! The staging invoker talks to a `Processor` instead of a concrete tool.
//! Production code uses [`super::CommandProcessor`]; tests provide their own
//! implementation that writes files into the staging directory directly.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::diag::DiagnosticCollector;
use crate::errors::Result;

/// Everything a processor needs for one run.
#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    /// Source files to process.
    pub files: Vec<PathBuf>,
    /// Directory that must receive every generated file (the staging
    /// directory, never the persistent output tree).
    pub output_dir: PathBuf,
    /// Comma-separated processor names.
    pub processors: String,
    /// Processor options (`-A<key>=<value>`).
    pub options: BTreeMap<String, String>,
    /// Raw tool options overriding the defaults.
    pub compiler_options: BTreeMap<String, String>,
    pub encoding: Option<String>,
    pub show_warnings: bool,
    /// Live source roots, for resolving references between sources.
    pub source_path: Vec<PathBuf>,
}

/// A code processor.
///
/// Implementations report diagnostics into `diagnostics` as they go and
/// resolve to `Ok(true)` on success, `Ok(false)` when the tool ran but
/// reported failure, and `Err` when it could not run at all.
pub trait Processor: Send + Sync {
    fn process<'a>(
        &'a self,
        request: &'a ProcessRequest,
        diagnostics: DiagnosticCollector,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;
}
