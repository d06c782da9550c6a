#![allow(dead_code)]

use gensync::config::{ConfigFile, RawConfigFile};
use gensync::types::HashStorageMode;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from a config that passes validation: one processor and an output
/// directory of `<base>/out`, with sources under `<base>/src`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    base_dir: String,
}

impl ConfigFileBuilder {
    pub fn new(base_dir: &str) -> Self {
        let mut config = RawConfigFile::default();
        config.processor.processor = Some("com.example.Processor".to_string());
        config.sources.roots = vec!["src".to_string()];
        config.sources.test_roots = vec!["test-src".to_string()];
        config.output.directory = Some("out".to_string());
        config.output.scratch_directory = "scratch".to_string();
        config.build.hash_storage = HashStorageMode::Memory;

        Self {
            config,
            base_dir: base_dir.to_string(),
        }
    }

    pub fn processors(mut self, names: &[&str]) -> Self {
        self.config.processor.processors = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn root(mut self, root: &str) -> Self {
        self.config.sources.roots.push(root.to_string());
        self
    }

    pub fn roots(mut self, roots: &[&str]) -> Self {
        self.config.sources.roots = roots.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn include(mut self, pattern: &str) -> Self {
        self.config.sources.includes.push(pattern.to_string());
        self
    }

    pub fn output(mut self, dir: &str) -> Self {
        self.config.output.directory = Some(dir.to_string());
        self
    }

    pub fn test_output(mut self, dir: &str) -> Self {
        self.config.output.test_directory = Some(dir.to_string());
        self
    }

    pub fn incremental(mut self, val: bool) -> Self {
        self.config.build.incremental = val;
        self
    }

    pub fn ignore_delta(mut self, val: bool) -> Self {
        self.config.build.ignore_delta = val;
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.config.options.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self) -> &RawConfigFile {
        &self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config)
            .expect("Failed to build valid config from builder")
            .with_base_dir(self.base_dir)
    }
}
