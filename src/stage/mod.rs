// src/stage/mod.rs

//! Isolated processor runs.
//!
//! The processor never writes into the persistent output tree. Each run gets
//! its own staging directory ([`dir`]) that the invoker ([`invoker`]) hands
//! to the processor as its only output target.

pub mod dir;
pub mod invoker;

pub use dir::{StagingDir, STAGING_PREFIX};
pub use invoker::{Invocation, StagingInvoker};
