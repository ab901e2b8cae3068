//! Error types for the membership filter
//!
//! The filter operations themselves are infallible. Errors only arise when a
//! filter is configured or when the request boundary rejects input.

use thiserror::Error;

/// Errors that can occur while configuring or driving a membership filter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    #[error("Please enter a value.")]
    EmptyValue,
}
