// src/exec/mod.rs

//! Processor execution layer.
//!
//! - [`backend`] defines the `Processor` capability and the request it
//!   receives; tests plug in their own implementation.
//! - [`command`] is the production processor running an external command via
//!   `tokio::process::Command`.
//! - [`arguments`] builds that command's javac-style arguments.
//! - [`output`] recognises diagnostics in the command's output.

pub mod arguments;
pub mod backend;
pub mod command;
pub mod output;

pub use arguments::build_arguments;
pub use backend::{ProcessRequest, Processor};
pub use command::CommandProcessor;
pub use output::parse_diagnostic_line;
