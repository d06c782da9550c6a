// src/engine/generator.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::diag::{normalize_path, remap, DiagnosticSink};
use crate::engine::{RunOptions, RunStatus, RunSummary};
use crate::errors::{GensyncError, Result};
use crate::exec::{ProcessRequest, Processor};
use crate::fs::FileSystem;
use crate::scan::{
    ChangeOracle, ChangeScanner, FileHashStore, FullBuildOracle, HashOracle, HashStore,
    IncludeFilter, MemoryHashStore,
};
use crate::stage::{Invocation, StagingInvoker};
use crate::sync;
use crate::types::{BuildMode, HashStorageMode, SourceScope};

/// Pick the change oracle the config asks for.
///
/// Hash state is kept per scope (`<state_directory>/main`, `.../test`) so the
/// main and test variants don't see each other's sources as deleted.
pub fn build_oracle(
    config: &ConfigFile,
    fs: Arc<dyn FileSystem>,
    scope: SourceScope,
) -> Result<Box<dyn ChangeOracle>> {
    if !config.build().incremental {
        return Ok(Box::new(FullBuildOracle::new(fs)));
    }

    let store: Box<dyn HashStore> = match config.build().hash_storage {
        HashStorageMode::File => {
            let dir = match scope {
                SourceScope::Main => config.state_directory().join("main"),
                SourceScope::Test => config.state_directory().join("test"),
            };
            Box::new(FileHashStore::new(dir))
        }
        HashStorageMode::Memory => Box::new(MemoryHashStore::new()),
    };
    Ok(Box::new(HashOracle::new(fs, store)?))
}

/// Runs builds for one configuration.
///
/// Holds the collaborators that outlive a single build: the oracle's
/// recorded state and the diagnostic sink.
pub struct Generator {
    config: ConfigFile,
    fs: Arc<dyn FileSystem>,
    invoker: StagingInvoker,
    oracle: Box<dyn ChangeOracle>,
    sink: Box<dyn DiagnosticSink>,
}

impl Generator {
    pub fn new(
        config: ConfigFile,
        fs: Arc<dyn FileSystem>,
        processor: Arc<dyn Processor>,
        oracle: Box<dyn ChangeOracle>,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        let invoker = StagingInvoker::new(Arc::clone(&fs), processor);
        Self {
            config,
            fs,
            invoker,
            oracle,
            sink,
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Run one build.
    ///
    /// Nothing touches the filesystem before the scan has found work; the
    /// output directory is created by the reconcile step.
    ///
    /// Processor failure is returned as [`GensyncError::ProcessingFailed`]
    /// only after its staged output has been merged and its diagnostics
    /// reported. The oracle's baseline is only advanced on success.
    pub async fn execute(&mut self, options: &RunOptions) -> Result<RunSummary> {
        if options.skip {
            info!("skip requested; nothing to do");
            return Ok(RunSummary::idle(RunStatus::Skipped, None));
        }

        let scope = options.scope;
        let output = self.config.output_directory(scope);

        let roots = self.config.source_roots(self.fs.as_ref(), scope);
        let sources = self.config.sources();
        let filter = IncludeFilter::new(&sources.includes, &sources.extension)?;

        let mode = if options.force_full || !self.oracle.is_incremental() {
            BuildMode::Full
        } else {
            BuildMode::Incremental
        };

        let scan = ChangeScanner::new(self.fs.as_ref(), self.config.build().ignore_delta)
            .scan(&roots, &filter, mode, self.oracle.as_mut())?;

        if scan.files.is_empty() {
            debug!("no sources to process (skipping)");
            return Ok(RunSummary::idle(RunStatus::NoSources, Some(mode)));
        }

        for file in scan.files.iter() {
            self.sink.clear_diagnostics(file);
        }

        let request = self.request_template(&roots);
        let Invocation {
            succeeded,
            failure,
            diagnostics,
            staging,
        } = self
            .invoker
            .invoke(&scan.files, request, &self.config.scratch_directory())
            .await?;

        // Captured before the directory goes away.
        let staging_path = normalize_path(staging.path());
        let incremental_sync = mode.is_incremental() && !scan.deletions;

        let synced = sync::reconcile(self.fs.as_ref(), incremental_sync, staging.path(), &output);

        if let Err(err) = staging.close() {
            warn!(staging = ?staging_path, error = %err, "unable to remove staging directory");
        }

        let remapped = remap(&diagnostics, &staging_path, &output);
        for diagnostic in remapped.iter() {
            self.sink.add_diagnostic(diagnostic);
        }

        let report = synced?;
        self.sink.refresh(&output);

        if !succeeded {
            return Err(GensyncError::ProcessingFailed(
                failure.unwrap_or_else(|| "processor failed".to_string()),
            ));
        }

        self.oracle.commit(&roots, &filter)?;

        info!(
            %mode,
            files = scan.files.len(),
            diagnostics = remapped.len(),
            "generation complete"
        );

        Ok(RunSummary {
            status: RunStatus::Completed,
            mode: Some(mode),
            files: scan.files.len(),
            sync: report,
            diagnostics: remapped,
        })
    }

    fn request_template(&self, roots: &[crate::scan::SourceRoot]) -> ProcessRequest {
        let processor = self.config.processor();
        ProcessRequest {
            files: Vec::new(),
            output_dir: Default::default(),
            processors: self.config.processor_names(),
            options: self.config.options().clone(),
            compiler_options: self.config.compiler_options().clone(),
            encoding: processor.encoding.clone(),
            show_warnings: processor.show_warnings,
            source_path: roots
                .iter()
                .filter(|r| r.live)
                .map(|r| r.path.clone())
                .collect(),
        }
    }
}
