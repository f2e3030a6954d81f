//! Error types for facto operations.
//!
//! This module defines [`FactoError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FactoError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `FactoError::Other`) for unexpected errors
//! - Configuration errors exit with code 2; failed steps exit with the
//!   child's exit code

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for facto operations.
#[derive(Debug, Error)]
pub enum FactoError {
    /// Matrix file not found at expected location.
    #[error("Matrix file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse matrix file.
    #[error("Failed to parse matrix file at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid matrix structure or values.
    #[error("Invalid matrix: {message}")]
    ConfigValidation { message: String },

    /// Requested environment name matches no declared profile and has no
    /// applicable default.
    #[error("Unknown environment '{name}' (declared: {})", available.join(", "))]
    UnknownEnvironment {
        name: String,
        available: Vec<String>,
    },

    /// A dependency or package install step exited non-zero.
    #[error("Install step failed with exit code {code:?}: {command}")]
    InstallFailed { command: String, code: Option<i32> },

    /// A pre-command or main command exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FactoError {
    /// Exit code this error should produce.
    ///
    /// Failed steps surface the child's exit code; everything else is a
    /// configuration error reported as 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            FactoError::InstallFailed { code, .. } | FactoError::CommandFailed { code, .. } => {
                code.unwrap_or(1)
            }
            _ => 2,
        }
    }
}

/// Result type alias for facto operations.
pub type Result<T> = std::result::Result<T, FactoError>;
