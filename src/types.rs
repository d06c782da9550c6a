use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Whether a build may skip unchanged inputs.
///
/// - `Incremental`: only roots with changes (or deletions) are reprocessed.
/// - `Full`: every matching file under every live root is reprocessed and the
///   output tree is mirrored exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Incremental,
    Full,
}

impl BuildMode {
    pub fn is_incremental(self) -> bool {
        matches!(self, BuildMode::Incremental)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Incremental => f.write_str("incremental"),
            BuildMode::Full => f.write_str("full"),
        }
    }
}

/// Which set of source roots / output directory a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceScope {
    #[default]
    Main,
    Test,
}

/// Where the change oracle keeps its per-file hashes between builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashStorageMode {
    /// Store hashes in a file (`<state_directory>/hashes`).
    File,
    /// Store hashes in memory only (lost on restart).
    Memory,
}

impl Default for HashStorageMode {
    fn default() -> Self {
        HashStorageMode::File
    }
}

impl FromStr for HashStorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(HashStorageMode::File),
            "memory" => Ok(HashStorageMode::Memory),
            other => Err(format!(
                "invalid hash_storage: {other} (expected \"file\" or \"memory\")"
            )),
        }
    }
}
