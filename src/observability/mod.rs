//! # Observability
//!
//! Structured logging for server lifecycle and best-effort failure paths.

pub mod logger;

pub use logger::{Logger, Severity};
