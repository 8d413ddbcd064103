//! Command implementations for the pdash CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `panels` - Panel selection (list, enable, reset)
//! - `layout` - Per-columns-count layout (layout, collapse, expand, move, columns)
//! - `config` - Configuration file management (init, path, validate)

pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod panels;

pub(crate) use config::*;
pub(crate) use layout::*;
pub(crate) use panels::*;
