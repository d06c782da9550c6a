// src/scan/oracle.rs

//! Change-detection oracles.
//!
//! The scanner never persists anything itself. It asks a [`ChangeOracle`]
//! which files under a root are new or modified and which have disappeared
//! since the last successful build, and tells it when a build succeeded so
//! the oracle can record the new baseline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::fs::FileSystem;
use crate::scan::hash::{compute_file_hash, HashStore};
use crate::scan::patterns::{collect_matching_files, IncludeFilter};
use crate::scan::SourceRoot;

pub trait ChangeOracle: Send {
    /// Whether this build may rely on recorded state at all.
    fn is_incremental(&self) -> bool;

    /// Files under `root` included by `filter` that are new or modified.
    fn changed_files(&mut self, root: &Path, filter: &IncludeFilter) -> Result<Vec<PathBuf>>;

    /// Files under `root` included by `filter` that existed at the last
    /// build and are gone now.
    fn deleted_files(&mut self, root: &Path, filter: &IncludeFilter) -> Result<Vec<PathBuf>>;

    /// Record the current state of `roots` as the new baseline.
    fn commit(&mut self, roots: &[SourceRoot], filter: &IncludeFilter) -> Result<()>;
}

/// Oracle for plain batch builds: nothing is remembered, every included file
/// counts as changed and nothing is ever reported deleted.
#[derive(Debug, Clone)]
pub struct FullBuildOracle {
    fs: Arc<dyn FileSystem>,
}

impl FullBuildOracle {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl ChangeOracle for FullBuildOracle {
    fn is_incremental(&self) -> bool {
        false
    }

    fn changed_files(&mut self, root: &Path, filter: &IncludeFilter) -> Result<Vec<PathBuf>> {
        collect_matching_files(self.fs.as_ref(), root, filter)
    }

    fn deleted_files(&mut self, _root: &Path, _filter: &IncludeFilter) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn commit(&mut self, _roots: &[SourceRoot], _filter: &IncludeFilter) -> Result<()> {
        Ok(())
    }
}

/// Incremental oracle comparing blake3 content hashes against the ones
/// recorded in a [`HashStore`] at the last successful build.
///
/// With no recorded baseline (first build) every file is new, so the first
/// incremental build processes everything.
pub struct HashOracle {
    fs: Arc<dyn FileSystem>,
    store: Box<dyn HashStore>,
    baseline: BTreeMap<PathBuf, String>,
}

impl HashOracle {
    pub fn new(fs: Arc<dyn FileSystem>, store: Box<dyn HashStore>) -> Result<Self> {
        let baseline = store.load_all()?;
        Ok(Self {
            fs,
            store,
            baseline,
        })
    }

    /// Number of files in the recorded baseline.
    pub fn baseline_len(&self) -> usize {
        self.baseline.len()
    }

    fn current_hashes(
        &self,
        root: &Path,
        filter: &IncludeFilter,
    ) -> Result<BTreeMap<PathBuf, String>> {
        let mut hashes = BTreeMap::new();
        for path in collect_matching_files(self.fs.as_ref(), root, filter)? {
            let hash = compute_file_hash(self.fs.as_ref(), &path)?;
            hashes.insert(path, hash);
        }
        Ok(hashes)
    }
}

impl ChangeOracle for HashOracle {
    fn is_incremental(&self) -> bool {
        true
    }

    fn changed_files(&mut self, root: &Path, filter: &IncludeFilter) -> Result<Vec<PathBuf>> {
        let changed: Vec<PathBuf> = self
            .current_hashes(root, filter)?
            .into_iter()
            .filter(|(path, hash)| self.baseline.get(path) != Some(hash))
            .map(|(path, _)| path)
            .collect();

        debug!(root = ?root, changed = changed.len(), "hash oracle: changed files");
        Ok(changed)
    }

    fn deleted_files(&mut self, root: &Path, filter: &IncludeFilter) -> Result<Vec<PathBuf>> {
        let deleted: Vec<PathBuf> = self
            .baseline
            .keys()
            .filter(|path| filter.matches_under(root, path))
            .filter(|path| !self.fs.exists(path))
            .cloned()
            .collect();

        debug!(root = ?root, deleted = deleted.len(), "hash oracle: deleted files");
        Ok(deleted)
    }

    fn commit(&mut self, roots: &[SourceRoot], filter: &IncludeFilter) -> Result<()> {
        let mut next = self.baseline.clone();

        for root in roots {
            next.retain(|path, _| !filter.matches_under(&root.path, path));
            if root.live {
                next.extend(self.current_hashes(&root.path, filter)?);
            }
        }

        self.store.store_all(&next)?;
        self.baseline = next;
        Ok(())
    }
}
