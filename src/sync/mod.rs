// src/sync/mod.rs

//! Merge a staging tree into the persistent output tree.
//!
//! Files are only touched when their content differs (size, then CRC-32),
//! so modification times of unchanged outputs survive a rebuild and
//! downstream tools keyed on mtimes don't see spurious changes.

pub mod checksum;

pub use checksum::{crc32, file_checksum, Crc32};

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::fs::FileSystem;

/// What a reconcile did. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files moved or copied into the persistent tree.
    pub copied: usize,
    /// Files left untouched because their content matched.
    pub unchanged: usize,
    /// Persistent entries (files or whole directories) removed.
    pub deleted: usize,
    pub dirs_created: usize,
}

impl SyncReport {
    /// True if the persistent tree was not modified at all.
    pub fn is_noop(&self) -> bool {
        self.copied == 0 && self.deleted == 0 && self.dirs_created == 0
    }
}

/// Reconcile `staging` into `persistent`, recursively.
///
/// - Every staged directory is created in `persistent` if missing.
/// - Every staged file is moved into `persistent` unless an identical file
///   is already there.
/// - When `incremental` is false, entries present in `persistent` but not in
///   `staging` are deleted, so the visited directories end up an exact
///   mirror. When true, nothing is deleted.
///
/// Staged files that were moved are consumed; the staging tree should be
/// discarded afterwards.
pub fn reconcile(
    fs: &dyn FileSystem,
    incremental: bool,
    staging: &Path,
    persistent: &Path,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    if !fs.is_dir(persistent) {
        fs.create_dir_all(persistent)?;
        report.dirs_created += 1;
    }
    sync_dir(fs, incremental, staging, persistent, &mut report)
        .with_context(|| format!("syncing {:?} into {:?}", staging, persistent))?;

    info!(
        copied = report.copied,
        unchanged = report.unchanged,
        deleted = report.deleted,
        dirs_created = report.dirs_created,
        incremental,
        "output tree reconciled"
    );
    Ok(report)
}

fn sync_dir(
    fs: &dyn FileSystem,
    incremental: bool,
    staging: &Path,
    persistent: &Path,
    report: &mut SyncReport,
) -> Result<()> {
    let staged = children(fs, staging)?;
    let existing = children(fs, persistent)?;

    if !incremental {
        for (name, path) in existing.iter() {
            if !staged.contains_key(name) {
                debug!(path = ?path, "removing stale output");
                delete_entry(fs, path)?;
                report.deleted += 1;
            }
        }
    }

    for (name, source) in staged.iter() {
        let target = persistent.join(name);

        if fs.is_file(source) {
            if fs.is_dir(&target) {
                delete_entry(fs, &target)?;
                report.deleted += 1;
            }
            if copy_if_changed(fs, source, &target)? {
                report.copied += 1;
            } else {
                report.unchanged += 1;
            }
        } else if fs.is_dir(source) {
            if fs.is_file(&target) {
                delete_entry(fs, &target)?;
                report.deleted += 1;
            }
            if !fs.is_dir(&target) {
                fs.create_dir_all(&target)?;
                report.dirs_created += 1;
            }
            sync_dir(fs, incremental, source, &target, report)?;
        }
    }

    Ok(())
}

/// Immediate children of `dir` keyed by file name. A missing directory has
/// no children.
fn children(fs: &dyn FileSystem, dir: &Path) -> Result<BTreeMap<OsString, PathBuf>> {
    if !fs.is_dir(dir) {
        return Ok(BTreeMap::new());
    }
    Ok(fs
        .read_dir(dir)?
        .into_iter()
        .filter_map(|path| path.file_name().map(|n| (n.to_os_string(), path.clone())))
        .collect())
}

/// Move `source` over `target` unless both hold the same bytes.
///
/// Returns whether `target` was written.
fn copy_if_changed(fs: &dyn FileSystem, source: &Path, target: &Path) -> Result<bool> {
    if fs.is_file(target) {
        if same_content(fs, source, target)? {
            return Ok(false);
        }
        fs.remove_file(target)?;
    }

    if let Err(err) = fs.rename(source, target) {
        debug!(
            source = ?source,
            target = ?target,
            error = %err,
            "rename failed; falling back to copy"
        );
        fs.copy(source, target)?;
        fs.remove_file(source)?;
    }
    Ok(true)
}

fn same_content(fs: &dyn FileSystem, a: &Path, b: &Path) -> Result<bool> {
    if fs.file_len(a)? != fs.file_len(b)? {
        return Ok(false);
    }
    Ok(file_checksum(fs, a)? == file_checksum(fs, b)?)
}

fn delete_entry(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if fs.is_dir(path) {
        fs.remove_dir_all(path)
    } else {
        fs.remove_file(path)
    }
}
