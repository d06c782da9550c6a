// src/stage/invoker.rs

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::diag::{Diagnostic, DiagnosticCollector};
use crate::errors::Result;
use crate::exec::{ProcessRequest, Processor};
use crate::fs::FileSystem;
use crate::scan::FileSet;
use crate::stage::dir::StagingDir;

/// Result of one processor run.
///
/// `staging` holds whatever the processor managed to write, even when it
/// failed. Dropping it deletes the directory.
#[derive(Debug)]
pub struct Invocation {
    pub succeeded: bool,
    /// Why the run failed, if it did.
    pub failure: Option<String>,
    /// Everything the processor reported before it finished or failed.
    pub diagnostics: Vec<Diagnostic>,
    pub staging: StagingDir,
}

/// Runs a [`Processor`] against a fresh staging directory.
///
/// The processor runs on its own tokio task so a panic inside it is caught
/// as a failed invocation. Invocations through one invoker never overlap.
pub struct StagingInvoker {
    fs: Arc<dyn FileSystem>,
    processor: Arc<dyn Processor>,
    turn: Mutex<()>,
}

impl StagingInvoker {
    pub fn new(fs: Arc<dyn FileSystem>, processor: Arc<dyn Processor>) -> Self {
        Self {
            fs,
            processor,
            turn: Mutex::new(()),
        }
    }

    /// Process `files` with `request`'s settings, writing into a new staging
    /// directory under `scratch`.
    ///
    /// `request.files` and `request.output_dir` are overwritten. Only failing
    /// to create the staging directory is an error; processor failures are
    /// reported through [`Invocation::succeeded`].
    pub async fn invoke(
        &self,
        files: &FileSet,
        mut request: ProcessRequest,
        scratch: &Path,
    ) -> Result<Invocation> {
        let _turn = self.turn.lock().await;

        let staging = StagingDir::create(Arc::clone(&self.fs), scratch)?;
        request.files = files.iter().cloned().collect();
        request.output_dir = staging.path().to_path_buf();

        let collector = DiagnosticCollector::new();
        let processor = Arc::clone(&self.processor);
        let reporter = collector.clone();
        let handle =
            tokio::spawn(async move { processor.process(&request, reporter).await });

        let failure = match handle.await {
            Ok(Ok(true)) => None,
            Ok(Ok(false)) => Some("processor reported failure".to_string()),
            Ok(Err(err)) => Some(err.to_string()),
            Err(join_err) => Some(format!("processor crashed: {join_err}")),
        };

        let diagnostics = collector.diagnostics();
        match &failure {
            None => info!(
                staging = ?staging.path(),
                diagnostics = diagnostics.len(),
                "processor finished"
            ),
            Some(reason) => error!(
                staging = ?staging.path(),
                diagnostics = diagnostics.len(),
                %reason,
                "processor failed"
            ),
        }

        Ok(Invocation {
            succeeded: failure.is_none(),
            failure,
            diagnostics,
            staging,
        })
    }
}
