//! State shared by every part of the shell for the life of the process.

use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::job::JobTable;
use crate::mode::{ModeController, ModeFlags, SHELL_MODE};
use mish_hal::{ProcessStatus, Signal};
use std::path::{Path, PathBuf};

/// ShellState owns everything the shell remembers between commands.
///
/// It is created once at startup and passed by reference to every
/// component; nothing else in the core keeps global state apart from the
/// mode flags, which the signal handler must be able to reach.
#[derive(Debug)]
pub struct ShellState {
    /// Outstanding background jobs.
    pub jobs: JobTable,
    /// Mode flags shared with the stop-signal handler.
    pub mode: &'static ModeFlags,
    /// How the most recent foreground command ended.
    pub last_foreground_status: ProcessStatus,
    exit_signal: Signal,
    null_device: PathBuf,
}

impl ShellState {
    /// State wired to the process-wide mode flags.
    pub fn new(config: &ShellConfig) -> ShellResult<Self> {
        Self::with_mode(config, &SHELL_MODE)
    }

    /// State wired to an explicit set of mode flags.
    pub fn with_mode(config: &ShellConfig, mode: &'static ModeFlags) -> ShellResult<Self> {
        config.validate()?;
        Ok(Self {
            jobs: JobTable::with_capacity(config.max_background_jobs),
            mode,
            last_foreground_status: ProcessStatus::default(),
            exit_signal: config.exit_signal()?,
            null_device: config.null_device.clone(),
        })
    }

    pub fn mode_controller(&self) -> ModeController<'static> {
        ModeController::new(self.mode)
    }

    pub fn exit_signal(&self) -> Signal {
        self.exit_signal
    }

    pub fn null_device(&self) -> &Path {
        &self.null_device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let flags: &'static ModeFlags = Box::leak(Box::new(ModeFlags::new()));
        let state = ShellState::with_mode(&ShellConfig::default(), flags).unwrap();
        assert!(state.jobs.is_empty());
        assert_eq!(state.jobs.capacity(), 256);
        assert_eq!(state.last_foreground_status, ProcessStatus::Exited(0));
        assert_eq!(state.exit_signal(), Signal::SIGKILL);
        assert_eq!(state.null_device(), Path::new("/dev/null"));
        assert!(state.mode.background_allowed());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ShellConfig {
            exit_signal: "bogus".to_string(),
            ..ShellConfig::default()
        };
        assert!(ShellState::new(&config).is_err());
    }
}
