//! Error types for panel-layout
//!
//! This module defines the error hierarchy using thiserror for structured
//! error handling across layout, registry, form and storage operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ColumnsCount;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Layout precondition violation
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Panel selection form error
    #[error(transparent)]
    Form(#[from] FormError),

    /// Persistence error
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Layout precondition violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The panel is not in the user's enabled set
    #[error("Panel not enabled: {0}")]
    PanelNotEnabled(String),

    /// A stored or requested column is negative
    #[error("Negative column {column} for panel {panel} at {columns_count} columns")]
    NegativeColumn {
        /// Panel carrying the column
        panel: String,
        /// Offending column value
        column: i32,
        /// Columns-count the layout belongs to
        columns_count: ColumnsCount,
    },

    /// A stored or requested column does not fit the grid
    #[error("Column {column} out of range for panel {panel} at {columns_count} columns")]
    ColumnOutOfRange {
        /// Panel carrying the column
        panel: String,
        /// Offending column value
        column: i32,
        /// Columns-count the layout belongs to
        columns_count: ColumnsCount,
    },

    /// A dashboard cannot have zero columns
    #[error("Invalid columns count: {0}")]
    InvalidColumnsCount(ColumnsCount),
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A panel with this name is already registered
    #[error("Panel already registered: {0}")]
    AlreadyRegistered(String),

    /// No panel with this name is registered
    #[error("Panel not registered: {0}")]
    NotRegistered(String),

    /// Panel names must be non-empty identifiers
    #[error("Invalid panel name: {0:?}")]
    InvalidName(String),
}

/// Panel selection form errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// An enabled panel depends on panels that are not enabled
    #[error("Dependencies not satisfied for {panel}: missing {}", missing.join(", "))]
    DependenciesNotSatisfied {
        /// Panel whose dependencies are missing
        panel: String,
        /// Dependencies that are not enabled
        missing: Vec<String>,
    },
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error reading or writing a record
    #[error("Failed to access panel record: {0}")]
    Io(#[source] std::io::Error),

    /// Failed to parse a stored record
    #[error("Failed to parse panel record {path}: {message}")]
    Parse {
        /// Record location
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Failed to serialize a record
    #[error("Failed to serialize panel record: {0}")]
    Serialize(String),

    /// Failed to write a record atomically
    #[error("Failed to write panel record atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path to the record file
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },

    /// User identity cannot be used as a storage key
    #[error("Invalid user identity: {0:?}")]
    InvalidUser(String),
}

/// Result type alias for panel-layout operations
pub type Result<T> = std::result::Result<T, Error>;
