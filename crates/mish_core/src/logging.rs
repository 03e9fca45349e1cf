//! Diagnostic logging setup.
//!
//! Shell output proper (prompt, status lines, mode banners) is written
//! directly to standard output; `tracing` carries only diagnostics, which go
//! to standard error or to the configured log file.

use crate::config::LoggingConfig;
use crate::error::ShellResult;

/// Environment variable whose filter directive overrides the configured level.
pub const LOG_ENV: &str = "MISH_LOG";

/// Install the global subscriber. Calling this twice is an error.
#[cfg(feature = "logging")]
pub fn init(config: &LoggingConfig) -> ShellResult<()> {
    use crate::error::ShellError;
    use std::path::Path;
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ShellError::config(format!("invalid log level {:?}: {e}", config.level))
        })?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match &config.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                ShellError::config(format!("log_file {} has no file name", path.display()))
            })?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| ShellError::config(format!("logging: {e}")))
}

#[cfg(not(feature = "logging"))]
pub fn init(_config: &LoggingConfig) -> ShellResult<()> {
    Ok(())
}
