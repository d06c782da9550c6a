use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gensync::diag::{DiagnosticSink, RemappedDiagnostic};

/// Everything a [`RecordingSink`] was told, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Added(RemappedDiagnostic),
    Cleared(PathBuf),
    Refreshed(PathBuf),
}

/// A diagnostic sink that records calls into a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<RemappedDiagnostic> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Added(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn cleared(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Cleared(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn refreshed(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Refreshed(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn add_diagnostic(&mut self, diagnostic: &RemappedDiagnostic) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Added(diagnostic.clone()));
    }

    fn clear_diagnostics(&mut self, file: &Path) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Cleared(file.to_path_buf()));
    }

    fn refresh(&mut self, directory: &Path) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Refreshed(directory.to_path_buf()));
    }
}
