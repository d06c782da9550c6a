// src/scan/mod.rs

//! Source selection: which files does this build hand to the processor?
//!
//! This module is responsible for:
//! - Rewriting dotted package includes into path globs ([`patterns`]).
//! - Hashing sources and remembering those hashes between builds ([`hash`]).
//! - Asking a [`ChangeOracle`] what changed or disappeared per root, and
//!   turning that into a deduplicated [`FileSet`] ([`ChangeScanner`]).

pub mod hash;
pub mod oracle;
pub mod patterns;

pub use hash::{compute_file_hash, FileHashStore, HashStore, MemoryHashStore, HASH_FILE_NAME};
pub use oracle::{ChangeOracle, FullBuildOracle, HashOracle};
pub use patterns::{collect_matching_files, effective_patterns, IncludeFilter};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::fs::FileSystem;
use crate::types::BuildMode;

/// A configured source directory and whether it exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    pub path: PathBuf,
    pub live: bool,
}

impl SourceRoot {
    pub fn new(path: impl Into<PathBuf>, live: bool) -> Self {
        Self {
            path: path.into(),
            live,
        }
    }

    /// A root is live when it exists as a directory.
    pub fn locate(fs: &dyn FileSystem, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let live = fs.is_dir(&path);
        Self { path, live }
    }
}

/// Deduplicated set of source files to process.
pub type FileSet = BTreeSet<PathBuf>;

/// Result of a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub files: FileSet,
    /// Some root reported deleted sources since the last build.
    pub deletions: bool,
}

/// What a single root contributes in incremental mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RootDelta {
    #[default]
    Untouched,
    Rescan,
    ChangedOnly,
}

fn classify(changed: usize, deleted: usize, ignore_delta: bool) -> RootDelta {
    match (changed, deleted) {
        (0, 0) => RootDelta::Untouched,
        // Dependents of a deleted source must be regenerated too.
        (_, 1..) => RootDelta::Rescan,
        _ if ignore_delta => RootDelta::Rescan,
        _ => RootDelta::ChangedOnly,
    }
}

/// Determines which source files a build must reprocess.
#[derive(Debug)]
pub struct ChangeScanner<'a> {
    fs: &'a dyn FileSystem,
    ignore_delta: bool,
}

impl<'a> ChangeScanner<'a> {
    pub fn new(fs: &'a dyn FileSystem, ignore_delta: bool) -> Self {
        Self { fs, ignore_delta }
    }

    /// Scan `roots` under `filter`.
    ///
    /// - `BuildMode::Full`: every included file under every live root.
    /// - `BuildMode::Incremental`: per root, nothing if the oracle saw no
    ///   change, the whole root if it saw deletions (or saw changes and
    ///   `ignore_delta` is set), otherwise just the changed files.
    ///
    /// A deletion in any root makes every live root a full rescan: the
    /// output tree is then mirrored from staging, which must hold the output
    /// of every source.
    ///
    /// Roots that don't exist are skipped. An empty result means the caller
    /// has nothing to do.
    pub fn scan(
        &self,
        roots: &[SourceRoot],
        filter: &IncludeFilter,
        mode: BuildMode,
        oracle: &mut dyn ChangeOracle,
    ) -> Result<ScanOutcome> {
        let live: Vec<&SourceRoot> = roots
            .iter()
            .filter(|root| {
                if !root.live {
                    debug!(root = ?root.path, "skipping missing source root");
                }
                root.live
            })
            .collect();

        let mut outcome = ScanOutcome::default();
        let mut deltas = Vec::with_capacity(live.len());

        if mode.is_incremental() {
            for root in live.iter() {
                let changed = oracle.changed_files(&root.path, filter)?;
                let deleted = oracle.deleted_files(&root.path, filter)?;
                outcome.deletions |= !deleted.is_empty();

                let delta = classify(changed.len(), deleted.len(), self.ignore_delta);
                debug!(
                    root = ?root.path,
                    changed = changed.len(),
                    deleted = deleted.len(),
                    ?delta,
                    "classified source root"
                );
                deltas.push((delta, changed));
            }
        }

        for (index, root) in live.iter().enumerate() {
            let rescan = !mode.is_incremental() || outcome.deletions;
            let files = if rescan {
                collect_matching_files(self.fs, &root.path, filter)?
            } else {
                match std::mem::take(&mut deltas[index]) {
                    (RootDelta::Untouched, _) => Vec::new(),
                    (RootDelta::Rescan, _) => {
                        collect_matching_files(self.fs, &root.path, filter)?
                    }
                    (RootDelta::ChangedOnly, changed) => changed,
                }
            };

            for file in files {
                outcome.files.insert(self.canonical(&file));
            }
        }

        info!(
            %mode,
            files = outcome.files.len(),
            deletions = outcome.deletions,
            "source scan complete"
        );
        Ok(outcome)
    }

    fn canonical(&self, path: &Path) -> PathBuf {
        self.fs
            .canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
