// src/exec/command.rs

//! Processor backed by an external command (e.g. `javac -proc:only`).

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::diag::DiagnosticCollector;
use crate::exec::arguments::build_arguments;
use crate::exec::backend::{ProcessRequest, Processor};
use crate::exec::output::parse_diagnostic_line;
use crate::errors::Result;
use crate::logging::PROCESSOR_TARGET;

/// Runs `command args... <generated arguments> <files>` and turns its output
/// into diagnostics.
///
/// Output lines that are not diagnostics are logged: as they arrive
/// normally, or only when the tool fails if `log_only_on_error` is set.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    command: String,
    args: Vec<String>,
    log_only_on_error: bool,
}

impl CommandProcessor {
    pub fn new(command: impl Into<String>, args: Vec<String>, log_only_on_error: bool) -> Self {
        Self {
            command: command.into(),
            args,
            log_only_on_error,
        }
    }

    async fn run(&self, request: &ProcessRequest, diagnostics: DiagnosticCollector) -> Result<bool> {
        let generated = build_arguments(request);
        info!(
            command = %self.command,
            files = request.files.len(),
            output = ?request.output_dir,
            "starting processor"
        );
        debug!(args = ?generated, "processor arguments");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .args(&generated)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning processor command '{}'", self.command))?;

        let stdout = child.stdout.take().map(|s| {
            tokio::spawn(drain(s, diagnostics.clone(), self.log_only_on_error))
        });
        let stderr = child.stderr.take().map(|s| {
            tokio::spawn(drain(s, diagnostics.clone(), self.log_only_on_error))
        });

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for processor command '{}'", self.command))?;

        let mut buffered = Vec::new();
        for handle in [stdout, stderr].into_iter().flatten() {
            buffered.extend(handle.await.context("joining processor output reader")?);
        }

        info!(
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            diagnostics = diagnostics.len(),
            "processor exited"
        );

        if !status.success() && self.log_only_on_error && !buffered.is_empty() {
            error!(target: PROCESSOR_TARGET, "processor output:\n{}", buffered.join("\n"));
        }

        Ok(status.success())
    }
}

impl Processor for CommandProcessor {
    fn process<'a>(
        &'a self,
        request: &'a ProcessRequest,
        diagnostics: DiagnosticCollector,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>> {
        Box::pin(self.run(request, diagnostics))
    }
}

/// Read `stream` line by line, reporting diagnostics and logging the rest
/// under [`PROCESSOR_TARGET`].
///
/// Diagnostic lines are not logged here; they are reported again, remapped,
/// through the sink. Returns every line read when `buffer` is set (for
/// `log_only_on_error`), otherwise nothing.
async fn drain<R>(stream: R, diagnostics: DiagnosticCollector, buffer: bool) -> Vec<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(stream).lines();
    let mut kept = Vec::new();

    while let Ok(Some(line)) = lines.next_line().await {
        let diagnostic = parse_diagnostic_line(&line);
        if buffer {
            kept.push(line);
        } else if diagnostic.is_none() {
            info!(target: PROCESSOR_TARGET, "{}", line);
        }
        if let Some(diagnostic) = diagnostic {
            diagnostics.report(diagnostic);
        }
    }

    kept
}
