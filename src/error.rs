//! Error types for regkv
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

use crate::native::{Status, ValueType};

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for regkv operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Native Errors
    // -------------------------------------------------------------------------
    /// A registry primitive returned a status the caller did not expect.
    ///
    /// `diagnostic` is the translated status, e.g.
    /// `[0x00000005] Access is denied.`
    #[error("{context}: {diagnostic}")]
    NativeStore {
        context: String,
        status: Status,
        diagnostic: String,
    },

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    /// The stored cell type disagrees with the accessor used to read it.
    #[error("unexpected registry type {found} for key {key}")]
    TypeMismatch { key: String, found: ValueType },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Native status carried by this error, if it came from the registry
    pub fn status(&self) -> Option<Status> {
        match self {
            StoreError::NativeStore { status, .. } => Some(*status),
            _ => None,
        }
    }
}
