// src/logging.rs

//! Log filtering for gensync.
//!
//! Two streams end up on stderr: gensync's own events (scan, staging,
//! reconcile) and the raw output of the external processor, which is logged
//! under its own target, [`PROCESSOR_TARGET`]. `GENSYNC_LOG` takes
//! `EnvFilter` directives, so the two can be tuned apart:
//!
//! ```text
//! GENSYNC_LOG=debug,gensync::processor=warn   # quiet tool, chatty reconcile
//! GENSYNC_LOG=warn,gensync::processor=info    # only the tool's own output
//! ```
//!
//! `--log-level` overrides everything with a single level.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "GENSYNC_LOG";

/// Target of lines passed through from the processor's stdout/stderr.
pub const PROCESSOR_TARGET: &str = "gensync::processor";

const DEFAULT_DIRECTIVES: &str = "info";

/// Directives to filter with: the CLI level if given, else `env` if it
/// parses, else `info`.
pub fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.as_str().to_string();
    }
    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) if EnvFilter::try_new(directives).is_ok() => directives.to_string(),
        Some(directives) => {
            eprintln!("gensync: ignoring invalid {LOG_ENV_VAR}={directives:?}");
            DEFAULT_DIRECTIVES.to_string()
        }
        None => DEFAULT_DIRECTIVES.to_string(),
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = EnvFilter::try_new(filter_directives(cli_level, env.as_deref()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
