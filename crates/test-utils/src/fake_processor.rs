use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gensync::diag::{Diagnostic, DiagnosticCollector};
use gensync::errors::{GensyncError, Result};
use gensync::exec::{ProcessRequest, Processor};
use gensync::fs::FileSystem;

/// How a [`FakeProcessor`] run ends after writing its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Reports failure (like a non-zero exit code).
    Fail,
    /// Returns an error.
    Error,
    Panic,
}

/// A fake processor that:
/// - records every request it receives
/// - writes its scripted files (relative paths) into `request.output_dir`,
///   plus one generated file per input when asked to
/// - reports its scripted diagnostics, with sources relative to
///   `request.output_dir`
/// - then ends with the scripted [`Outcome`].
pub struct FakeProcessor {
    fs: Arc<dyn FileSystem>,
    outputs: Vec<(String, String)>,
    per_source: bool,
    diagnostics: Vec<(Diagnostic, Option<String>)>,
    outcome: Outcome,
    requests: Arc<Mutex<Vec<ProcessRequest>>>,
}

impl FakeProcessor {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            outputs: Vec::new(),
            per_source: false,
            diagnostics: Vec::new(),
            outcome: Outcome::Success,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn writes(mut self, rel: &str, content: &str) -> Self {
        self.outputs.push((rel.to_string(), content.to_string()));
        self
    }

    /// Also write `Q<Stem>.java` for every input file, the way a query-type
    /// generator does, so the output tracks the processed sources.
    pub fn writes_per_source(mut self) -> Self {
        self.per_source = true;
        self
    }

    /// Report `diagnostic`; `staged` names a file relative to the staging
    /// directory and replaces the diagnostic's source.
    pub fn reports(mut self, diagnostic: Diagnostic, staged: Option<&str>) -> Self {
        self.diagnostics.push((diagnostic, staged.map(str::to_string)));
        self
    }

    pub fn ends_with(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Shared log of received requests; stays valid after the processor is
    /// moved into a generator.
    pub fn requests(&self) -> Arc<Mutex<Vec<ProcessRequest>>> {
        Arc::clone(&self.requests)
    }

    fn run(&self, request: &ProcessRequest, collector: DiagnosticCollector) -> Result<bool> {
        self.requests.lock().unwrap().push(request.clone());

        for (rel, content) in self.outputs.iter() {
            let path = request.output_dir.join(rel);
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write(&path, content.as_bytes())?;
        }

        if self.per_source {
            for file in request.files.iter() {
                let Some(stem) = file.file_stem().map(|s| s.to_string_lossy().to_string())
                else {
                    continue;
                };
                let path = request.output_dir.join(format!("Q{stem}.java"));
                self.fs.write(&path, stem.as_bytes())?;
            }
        }

        for (diagnostic, staged) in self.diagnostics.iter() {
            let mut diagnostic = diagnostic.clone();
            if let Some(rel) = staged {
                diagnostic.source = Some(request.output_dir.join(rel));
            }
            collector.report(diagnostic);
        }

        match self.outcome {
            Outcome::Success => Ok(true),
            Outcome::Fail => Ok(false),
            Outcome::Error => Err(GensyncError::ProcessingFailed(
                "fake processor error".to_string(),
            )),
            Outcome::Panic => panic!("fake processor panicked"),
        }
    }
}

impl Processor for FakeProcessor {
    fn process<'a>(
        &'a self,
        request: &'a ProcessRequest,
        diagnostics: DiagnosticCollector,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>> {
        Box::pin(async move { self.run(request, diagnostics) })
    }
}

/// Files handed to the processor, per recorded request.
pub fn requested_files(requests: &Arc<Mutex<Vec<ProcessRequest>>>) -> Vec<Vec<PathBuf>> {
    requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.files.clone())
        .collect()
}
