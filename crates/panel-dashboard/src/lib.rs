//! Panel dashboard library
//!
//! Configuration, logging and request plumbing behind the `pdash` CLI. The
//! layout bookkeeping itself lives in the `panel-layout` crate; this crate
//! decides which user a request runs as, which panels exist and where the
//! records are stored.

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Logging initialization.
pub mod logging;

/// Request context and command errors.
mod context;
pub use context::*;
