// SPDX-License-Identifier: MIT

//! Typed error handling for display-logic
//!
//! Errors only surface while loading configuration or panel fixtures.
//! Rule evaluation and reconciliation never fail; they fall back to hiding.

use thiserror::Error;

/// Top-level error type for display-logic
#[derive(Debug, Error)]
pub enum DisplayLogicError {
    /// Configuration errors (invalid values, unsupported settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A comparison operator outside the supported vocabulary
    #[error("Unknown comparison operator: '{0}'")]
    UnknownOperator(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl DisplayLogicError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unknown operator error
    pub fn unknown_operator(op: impl Into<String>) -> Self {
        Self::UnknownOperator(op.into())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DisplayLogicError>;
