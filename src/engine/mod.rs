// src/engine/mod.rs

//! Build orchestration.
//!
//! One [`Generator::execute`] call is one build:
//!
//! 1. honour the skip switch (no side effects at all),
//! 2. scan sources for what needs processing,
//! 3. run the processor into a staging directory,
//! 4. reconcile staging into the persistent output tree,
//! 5. report remapped diagnostics and drop the staging directory.

pub mod generator;

pub use generator::{build_oracle, Generator};

use crate::diag::RemappedDiagnostic;
use crate::sync::SyncReport;
use crate::types::{BuildMode, SourceScope};

/// Environment variable that turns every run into a no-op when `"true"`.
pub const SKIP_ENV_VAR: &str = "GENSYNC_SKIP";

/// Per-run switches, read once when the run starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub scope: SourceScope,
    /// Reprocess everything regardless of what the oracle says.
    pub force_full: bool,
    pub skip: bool,
}

impl RunOptions {
    /// `skip` is set if requested explicitly or if `GENSYNC_SKIP=true`.
    pub fn from_env(scope: SourceScope, force_full: bool, skip: bool) -> Self {
        let env_skip = std::env::var(SKIP_ENV_VAR).is_ok_and(|v| v == "true");
        Self {
            scope,
            force_full,
            skip: skip || env_skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The skip switch was set.
    Skipped,
    /// Nothing needed processing; the processor was not run.
    NoSources,
    /// The processor ran and its output was merged.
    Completed,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub status: RunStatus,
    pub mode: Option<BuildMode>,
    /// Number of source files handed to the processor.
    pub files: usize,
    pub sync: SyncReport,
    pub diagnostics: Vec<RemappedDiagnostic>,
}

impl RunSummary {
    fn idle(status: RunStatus, mode: Option<BuildMode>) -> Self {
        Self {
            status,
            mode,
            files: 0,
            sync: SyncReport::default(),
            diagnostics: Vec::new(),
        }
    }
}
