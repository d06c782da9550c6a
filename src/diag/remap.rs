// src/diag/remap.rs

//! Point diagnostics raised against staged files at their persistent copies.

use std::path::{Component, Path, PathBuf};

use crate::diag::model::{Diagnostic, RemappedDiagnostic};

/// Lexically normalise `path`: drop `.` components and resolve `..` against
/// the preceding component. Relative paths are first anchored at the current
/// working directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Map `file` into `persistent` if it lives under `staging`.
///
/// `staging` must already be normalised. The prefix test is component-wise,
/// so `/t/apt12` does not claim `/t/apt123/Foo.java`.
pub fn remap_path(file: &Path, staging: &Path, persistent: &Path) -> PathBuf {
    let normalized = normalize_path(file);
    match normalized.strip_prefix(staging) {
        Ok(rel) => persistent.join(rel),
        Err(_) => normalized,
    }
}

/// Turn processor diagnostics into reportable ones.
///
/// - Diagnostics without a source file are dropped.
/// - Notes and other informational kinds are dropped; mandatory warnings
///   become warnings.
/// - Files under `staging` are rewritten to the same relative path under
///   `persistent`; everything else passes through normalised.
///
/// `staging` is the staging directory path captured when the invocation
/// started; the directory itself may already be gone.
pub fn remap(
    diagnostics: &[Diagnostic],
    staging: &Path,
    persistent: &Path,
) -> Vec<RemappedDiagnostic> {
    let staging = normalize_path(staging);

    diagnostics
        .iter()
        .filter_map(|d| {
            let source = d.source.as_ref()?;
            let severity = d.kind.marker()?;
            Some(RemappedDiagnostic {
                severity,
                file: remap_path(source, &staging, persistent),
                line: d.line,
                column: d.column,
                message: d.message.clone(),
            })
        })
        .collect()
}
