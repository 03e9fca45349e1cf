//! mish Core Library
//!
//! The process and signal control core of the shell: the shared shell
//! state, the foreground-only mode switch driven by the stop signal, the
//! background job table, launching and waiting on children, reaping
//! finished background jobs, and the three built-in commands.

// Re-export commonly used types and functions
pub use config::{LoggingConfig, ShellConfig};
pub use context::ShellState;
pub use error::{ShellError, ShellResult};
pub use job::JobTable;
pub use launcher::{launch, LaunchOutcome};
pub use mode::{Mode, ModeController, ModeFlags, PROMPT, SHELL_MODE};
pub use reaper::reap_completed;
pub use shell::{LoopControl, Shell};
pub use status::{report_status, status_line, Notice};

// Public modules
pub mod builtins;
pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod launcher;
pub mod logging;
pub mod mode;
pub mod reaper;
pub mod redirect;
pub mod shell;
pub mod startup;
pub mod status;

// Lightweight logging facade macros – keep call sites but allow stripping them in minimal builds
#[cfg(feature = "minimal-logging")]
#[macro_export]
macro_rules! mish_log_debug { ($($tt:tt)*) => { /* stripped in minimal build */ }; }
#[cfg(not(feature = "minimal-logging"))]
#[macro_export]
macro_rules! mish_log_debug { ($($tt:tt)*) => { tracing::debug!($($tt)*); }; }

#[cfg(feature = "minimal-logging")]
#[macro_export]
macro_rules! mish_log_info { ($($tt:tt)*) => { /* stripped */ }; }
#[cfg(not(feature = "minimal-logging"))]
#[macro_export]
macro_rules! mish_log_info { ($($tt:tt)*) => { tracing::info!($($tt)*); }; }

#[cfg(feature = "minimal-logging")]
#[macro_export]
macro_rules! mish_log_warn { ($($tt:tt)*) => { /* stripped */ }; }
#[cfg(not(feature = "minimal-logging"))]
#[macro_export]
macro_rules! mish_log_warn { ($($tt:tt)*) => { tracing::warn!($($tt)*); }; }

#[cfg(feature = "minimal-logging")]
#[macro_export]
macro_rules! mish_log_error { ($($tt:tt)*) => { /* stripped */ }; }
#[cfg(not(feature = "minimal-logging"))]
#[macro_export]
macro_rules! mish_log_error { ($($tt:tt)*) => { tracing::error!($($tt)*); }; }
