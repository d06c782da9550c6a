// src/config/mod.rs

//! Configuration loading and validation for gensync.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate that a run is fully specified before anything touches the
//!   filesystem (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_root_dir, default_config_path, load_and_validate, load_from_path};
pub use model::{
    BuildSection, ConfigFile, OutputSection, ProcessorSection, RawConfigFile, SourcesSection,
};
pub use validate::validate_raw_config;
