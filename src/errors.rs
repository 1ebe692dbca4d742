// src/errors.rs

//! Crate-wide error type and the mapping from errors to process exit codes.

use std::io;

use thiserror::Error;

/// Exit code for a failed fork, a failed wait, or a setup error.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a child that was created but could not exec its program.
pub const EXIT_EXEC_FAILED: i32 = 127;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Fork failed: {0}")]
    ForkFailed(#[source] io::Error),

    #[error("Failed to exec '{program}': {source}")]
    ExecFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Waiting for child failed: {0}")]
    WaitFailed(#[source] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaunchError {
    /// Process exit code the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ExecFailed { .. } => EXIT_EXEC_FAILED,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
