// src/lib.rs

pub mod cli;
pub mod config;
pub mod diag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod scan;
pub mod stage;
pub mod sync;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::diag::LogSink;
use crate::engine::{build_oracle, Generator, RunOptions, RunStatus};
use crate::exec::CommandProcessor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::effective_patterns;
use crate::types::SourceScope;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the skip switch (checked before anything else, config included)
/// - config loading
/// - the change oracle picked by `[build]`
/// - the command-backed processor
/// - one generator run
pub async fn run(args: CliArgs) -> Result<()> {
    let scope = if args.test {
        SourceScope::Test
    } else {
        SourceScope::Main
    };
    let options = RunOptions::from_env(scope, args.full, args.skip);
    if options.skip {
        info!("skipping processing (requested)");
        return Ok(());
    }

    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if args.dry_run {
        print_dry_run(&cfg, fs.as_ref(), scope);
        return Ok(());
    }

    let processor_cfg = cfg.processor();
    let processor = Arc::new(CommandProcessor::new(
        processor_cfg.command.clone(),
        processor_cfg.args.clone(),
        processor_cfg.log_only_on_error,
    ));
    let oracle = build_oracle(&cfg, Arc::clone(&fs), scope)?;

    let mut generator = Generator::new(cfg, fs, processor, oracle, Box::new(LogSink));
    let summary = generator.execute(&options).await?;

    match summary.status {
        RunStatus::Completed => info!(
            files = summary.files,
            copied = summary.sync.copied,
            unchanged = summary.sync.unchanged,
            deleted = summary.sync.deleted,
            "done"
        ),
        RunStatus::NoSources => info!("no sources needed processing"),
        RunStatus::Skipped => info!("skipped"),
    }
    Ok(())
}

/// Print the resolved plan without running anything.
fn print_dry_run(cfg: &ConfigFile, fs: &dyn FileSystem, scope: SourceScope) {
    let processor = cfg.processor();
    let sources = cfg.sources();
    let build = cfg.build();

    println!("gensync dry-run ({scope:?})");
    println!("  processor.command = {}", processor.command);
    if !processor.args.is_empty() {
        println!("  processor.args = {:?}", processor.args);
    }
    println!("  processor.processors = {}", cfg.processor_names());
    if let Some(ref encoding) = processor.encoding {
        println!("  processor.encoding = {encoding}");
    }
    println!();

    println!("source roots:");
    for root in cfg.source_roots(fs, scope) {
        let state = if root.live { "" } else { " (missing, skipped)" };
        println!("  - {}{}", root.path.display(), state);
    }
    println!(
        "patterns: {:?}",
        effective_patterns(&sources.includes, &sources.extension)
    );
    println!();

    println!("output: {}", cfg.output_directory(scope).display());
    println!("scratch: {}", cfg.scratch_directory().display());
    println!(
        "build: incremental = {}, ignore_delta = {}, hash_storage = {:?}",
        build.incremental, build.ignore_delta, build.hash_storage
    );

    if !cfg.options().is_empty() {
        println!("options:");
        for (key, value) in cfg.options() {
            println!("  -A{key}={value}");
        }
    }
    if !cfg.compiler_options().is_empty() {
        println!("compiler options:");
        for (key, value) in cfg.compiler_options() {
            println!("  -{key} {value}");
        }
    }

    debug!("dry-run complete (no execution)");
}
