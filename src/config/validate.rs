// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GensyncError, Result};
use crate::scan::IncludeFilter;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GensyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Run every check a config must pass before any filesystem mutation.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_processor(cfg)?;
    validate_output(cfg)?;
    validate_sources(cfg)?;
    Ok(())
}

fn validate_processor(cfg: &RawConfigFile) -> Result<()> {
    if cfg.processor.command.trim().is_empty() {
        return Err(GensyncError::ConfigError(
            "[processor].command must not be empty".to_string(),
        ));
    }

    let has_list = cfg
        .processor
        .processors
        .as_ref()
        .is_some_and(|list| list.iter().any(|p| !p.trim().is_empty()));
    let has_single = cfg
        .processor
        .processor
        .as_ref()
        .is_some_and(|p| !p.trim().is_empty());

    if !has_list && !has_single {
        return Err(GensyncError::ConfigError(
            "either [processor].processor or [processor].processors needs to be given"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    match cfg.output.directory.as_deref() {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        _ => Err(GensyncError::ConfigError(
            "[output].directory must be set".to_string(),
        )),
    }
}

fn validate_sources(cfg: &RawConfigFile) -> Result<()> {
    let ext = cfg.sources.extension.trim();
    if ext.is_empty() || ext.contains(['/', '\\', '*']) {
        return Err(GensyncError::ConfigError(format!(
            "[sources].extension is not a plain file extension: {:?}",
            cfg.sources.extension
        )));
    }

    // Compile once here so bad patterns fail before the build starts.
    IncludeFilter::new(&cfg.sources.includes, ext).map_err(|e| {
        GensyncError::ConfigError(format!("[sources].includes: {e:#}"))
    })?;
    Ok(())
}
