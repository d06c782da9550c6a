// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `gensync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gensync",
    version,
    about = "Run a source-generating processor and merge its output incrementally.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Gensync.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Gensync.toml")]
    pub config: String,

    /// Process the test source roots into the test output directory.
    #[arg(long)]
    pub test: bool,

    /// Ignore recorded state and reprocess every matching source file.
    #[arg(long)]
    pub full: bool,

    /// Do nothing at all (same as `GENSYNC_SKIP=true`).
    #[arg(long)]
    pub skip: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the `GENSYNC_LOG` filter (or `info`) is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the resolved plan, but don't run the processor.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level name as `EnvFilter` understands it.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
