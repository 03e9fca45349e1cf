//! Error types for the shell core.
//!
//! Nothing here is fatal to the shell: the command loop reports a
//! `ShellError` on standard error and goes back to the prompt.

use mish_hal::HalError;
use mish_parser::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for all core operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Main error type for the shell core
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Hal(#[from] HalError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl ShellError {
    pub fn config(msg: impl Into<String>) -> Self {
        ShellError::Config(msg.into())
    }
}
