//! Shell configuration loaded from a TOML file.
//!
//! ```toml
//! max_background_jobs = 256
//! exit_signal = "SIGKILL"
//! null_device = "/dev/null"
//!
//! [logging]
//! level = "warn"
//! log_file = "/tmp/mish.log"
//! ```

use crate::error::{ShellError, ShellResult};
use mish_hal::Signal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `MISH_LOG`
    pub level: String,
    /// Write diagnostics to this file instead of standard error
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Background jobs tracked at once; launches beyond this are not tracked
    pub max_background_jobs: usize,
    /// Signal sent to every tracked job by `exit`
    pub exit_signal: String,
    /// Source and sink for background jobs without explicit redirection
    pub null_device: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            max_background_jobs: 256,
            exit_signal: "SIGKILL".to_string(),
            null_device: PathBuf::from("/dev/null"),
            logging: LoggingConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Load from `path`, filling unspecified keys with defaults.
    pub fn load(path: &Path) -> ShellResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ShellError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ShellResult<Self> {
        let config: ShellConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ShellResult<()> {
        if self.max_background_jobs == 0 {
            return Err(ShellError::config("max_background_jobs must be at least 1"));
        }
        self.exit_signal()?;
        Ok(())
    }

    /// `exit_signal` as a signal; accepts `SIGKILL` or `KILL`.
    pub fn exit_signal(&self) -> ShellResult<Signal> {
        let name = self.exit_signal.trim().to_ascii_uppercase();
        let name = if name.starts_with("SIG") {
            name
        } else {
            format!("SIG{name}")
        };
        Signal::from_str(&name)
            .map_err(|_| ShellError::config(format!("unknown exit_signal {:?}", self.exit_signal)))
    }
}
