// src/scan/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::fs::FileSystem;

/// Compiled include filter for source files.
///
/// Built from dotted package patterns as they appear in the config:
///
/// ```toml
/// [sources]
/// includes = ["com.example.**.bo.**"]
/// extension = "java"
/// ```
///
/// Each pattern `a.b.c` becomes the path pattern `a/b/c/*.java`; an empty
/// list becomes the catch-all `**/*.java`. Patterns are matched against paths
/// relative to a source root, with forward slashes. `*` never crosses a
/// directory boundary; `**` does.
#[derive(Clone)]
pub struct IncludeFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for IncludeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncludeFilter")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl IncludeFilter {
    pub fn new(includes: &[String], extension: &str) -> Result<Self> {
        let patterns = effective_patterns(includes, extension);
        let set = build_globset(&patterns)?;
        Ok(Self { patterns, set })
    }

    /// Path patterns actually matched, after package rewriting.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if `rel_path` (relative to a source root) is included.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }

    /// Like [`IncludeFilter::matches`] for a path under `root`.
    pub fn matches_under(&self, root: &Path, path: &Path) -> bool {
        match path.strip_prefix(root) {
            Ok(rel) => self.matches(&rel.to_string_lossy().replace('\\', "/")),
            Err(_) => false,
        }
    }
}

/// Rewrite dotted package patterns into path patterns for `extension`.
pub fn effective_patterns(includes: &[String], extension: &str) -> Vec<String> {
    let suffix = format!("/*.{extension}");
    let rewritten: Vec<String> = includes
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", p.replace('.', "/"), suffix))
        .collect();

    if rewritten.is_empty() {
        vec![format!("**{suffix}")]
    } else {
        rewritten
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid include pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Collect all files under `root` that the filter includes.
pub fn collect_matching_files(
    fs: &dyn FileSystem,
    root: &Path,
    filter: &IncludeFilter,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) && filter.matches_under(root, &path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
