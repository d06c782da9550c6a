// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::FileSystem;
use crate::scan::SourceRoot;
use crate::types::{HashStorageMode, SourceScope};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [processor]
/// command = "javac"
/// processors = ["com.example.QueryProcessor"]
///
/// [sources]
/// roots = ["src/main/java"]
/// includes = ["com.example.**"]
///
/// [output]
/// directory = "target/generated-sources/java"
///
/// [options]
/// "querydsl.packageSuffix" = ".query"
/// ```
///
/// All sections except `[output]` are optional and have reasonable defaults.
/// This is the unvalidated form; see [`ConfigFile`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub processor: ProcessorSection,

    #[serde(default)]
    pub sources: SourcesSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub build: BuildSection,

    /// Processor options, forwarded verbatim as `-A<key>=<value>`.
    #[serde(default)]
    pub options: BTreeMap<String, String>,

    /// Raw tool options (`-<key> <value>`) that override the defaults.
    #[serde(default)]
    pub compiler_options: BTreeMap<String, String>,
}

/// `[processor]` section: how to run the external tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorSection {
    /// Executable to run.
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments placed before everything gensync generates.
    #[serde(default)]
    pub args: Vec<String>,

    /// A single processor name.
    #[serde(default)]
    pub processor: Option<String>,

    /// Several processor names; takes precedence over `processor`.
    #[serde(default)]
    pub processors: Option<Vec<String>>,

    /// Buffer tool output and only log it when the tool fails.
    #[serde(default)]
    pub log_only_on_error: bool,

    /// Pass warnings through (otherwise `-nowarn` is added).
    #[serde(default)]
    pub show_warnings: bool,

    #[serde(default)]
    pub encoding: Option<String>,
}

fn default_command() -> String {
    "javac".to_string()
}

impl Default for ProcessorSection {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            processor: None,
            processors: None,
            log_only_on_error: false,
            show_warnings: false,
            encoding: None,
        }
    }
}

/// `[sources]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesSection {
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,

    #[serde(default = "default_test_roots")]
    pub test_roots: Vec<String>,

    /// Dotted package patterns, e.g. `com.example.**.bo.**`.
    ///
    /// Empty means every source file under each root.
    #[serde(default)]
    pub includes: Vec<String>,

    /// Source file extension without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_roots() -> Vec<String> {
    vec!["src/main/java".to_string()]
}

fn default_test_roots() -> Vec<String> {
    vec!["src/test/java".to_string()]
}

fn default_extension() -> String {
    "java".to_string()
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            test_roots: default_test_roots(),
            includes: Vec::new(),
            extension: default_extension(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Persistent directory receiving generated sources.
    #[serde(default)]
    pub directory: Option<String>,

    /// Persistent directory for the test variant; falls back to `directory`.
    #[serde(default)]
    pub test_directory: Option<String>,

    /// Where staging directories are created.
    #[serde(default = "default_scratch_directory")]
    pub scratch_directory: String,
}

fn default_scratch_directory() -> String {
    "target".to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: None,
            test_directory: None,
            scratch_directory: default_scratch_directory(),
        }
    }
}

/// `[build]` section: incremental behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Track source hashes between builds and only reprocess changed roots.
    #[serde(default)]
    pub incremental: bool,

    /// When any file under a root changed, reprocess the whole root instead
    /// of just the changed files.
    #[serde(default = "default_ignore_delta")]
    pub ignore_delta: bool,

    #[serde(default = "default_state_directory")]
    pub state_directory: String,

    #[serde(default)]
    pub hash_storage: HashStorageMode,
}

fn default_ignore_delta() -> bool {
    true
}

fn default_state_directory() -> String {
    "target/.gensync".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            incremental: false,
            ignore_delta: default_ignore_delta(),
            state_directory: default_state_directory(),
            hash_storage: HashStorageMode::default(),
        }
    }
}

/// Validated configuration.
///
/// Obtained through `ConfigFile::try_from(raw)` (see `validate.rs`) or
/// [`crate::config::load_and_validate`]. Relative paths are resolved against
/// `base_dir`, which the loader sets to the config file's directory.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    raw: RawConfigFile,
    base_dir: PathBuf,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            raw,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn processor(&self) -> &ProcessorSection {
        &self.raw.processor
    }

    pub fn sources(&self) -> &SourcesSection {
        &self.raw.sources
    }

    pub fn build(&self) -> &BuildSection {
        &self.raw.build
    }

    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.raw.options
    }

    pub fn compiler_options(&self) -> &BTreeMap<String, String> {
        &self.raw.compiler_options
    }

    /// Comma-separated processor names handed to the tool.
    ///
    /// Validation guarantees one of `processors` / `processor` is present.
    pub fn processor_names(&self) -> String {
        match (&self.raw.processor.processors, &self.raw.processor.processor) {
            (Some(list), _) if list.iter().any(|p| !p.trim().is_empty()) => list
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(","),
            (_, Some(single)) => single.trim().to_string(),
            _ => String::new(),
        }
    }

    /// Persistent output directory for the given scope.
    pub fn output_directory(&self, scope: SourceScope) -> PathBuf {
        let dir = match scope {
            SourceScope::Main => self.raw.output.directory.as_ref(),
            SourceScope::Test => self
                .raw
                .output
                .test_directory
                .as_ref()
                .or(self.raw.output.directory.as_ref()),
        };
        // Validation rejects a missing `directory`.
        self.resolve(dir.map(String::as_str).unwrap_or_default())
    }

    pub fn scratch_directory(&self) -> PathBuf {
        self.resolve(&self.raw.output.scratch_directory)
    }

    pub fn state_directory(&self) -> PathBuf {
        self.resolve(&self.raw.build.state_directory)
    }

    /// Source roots for `scope`, with their liveness checked through `fs`.
    ///
    /// A root equal to the output directory is dropped so generated files are
    /// never fed back into the processor.
    pub fn source_roots(&self, fs: &dyn FileSystem, scope: SourceScope) -> Vec<SourceRoot> {
        let names = match scope {
            SourceScope::Main => &self.raw.sources.roots,
            SourceScope::Test => &self.raw.sources.test_roots,
        };
        let output = self.output_directory(scope);

        names
            .iter()
            .map(|name| self.resolve(name))
            .filter(|path| *path != output)
            .map(|path| SourceRoot::locate(fs, path))
            .collect()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}
