// src/stage/dir.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::fs::FileSystem;

/// Prefix of every staging directory name.
pub const STAGING_PREFIX: &str = "apt";

/// Last stamp handed out in this process; stamps only ever increase.
static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let prev = LAST_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(prev + 1)
}

/// A freshly created, uniquely named staging directory.
///
/// The directory is removed when the guard is closed or dropped, whichever
/// comes first, on every exit path. Removal failures are logged, never
/// propagated from `Drop`.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
    removed: bool,
}

impl StagingDir {
    /// Create `<scratch>/apt<millis>`, bumping the stamp past any name that
    /// is already taken.
    pub fn create(fs: Arc<dyn FileSystem>, scratch: &Path) -> Result<Self> {
        let mut stamp = next_stamp();
        let mut path = scratch.join(format!("{STAGING_PREFIX}{stamp}"));
        while fs.exists(&path) {
            stamp += 1;
            path = scratch.join(format!("{STAGING_PREFIX}{stamp}"));
        }
        LAST_STAMP.fetch_max(stamp, Ordering::SeqCst);

        fs.create_dir_all(&path)
            .with_context(|| format!("creating staging directory {:?}", path))?;
        debug!(path = ?path, "created staging directory");

        Ok(Self {
            path,
            fs,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting failure to the caller.
    pub fn close(mut self) -> Result<()> {
        self.removed = true;
        self.remove()
    }

    fn remove(&self) -> Result<()> {
        if self.fs.exists(&self.path) {
            self.fs.remove_dir_all(&self.path)?;
            debug!(path = ?self.path, "removed staging directory");
        }
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if let Err(err) = self.remove() {
            warn!(path = ?self.path, error = %err, "failed to remove staging directory");
        }
    }
}
