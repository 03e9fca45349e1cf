//! `cd` builtin command - change directory
//!
//! `cd DIR` changes to DIR; plain `cd` changes to `$HOME`. A failure is
//! reported naming the target and leaves the working directory alone.

use super::{Builtin, BuiltinOutcome};
use crate::context::ShellState;
use crate::error::ShellResult;
use crate::mish_log_debug;
use mish_hal::{HalError, HalResult};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The `cd` builtin command implementation
pub struct CdBuiltin;

impl CdBuiltin {
    /// Directory `cd` would change to, given the first argument and the
    /// value of `HOME`.
    pub fn target(first_arg: Option<&str>, home: Option<OsString>) -> Option<PathBuf> {
        match first_arg {
            Some(dir) => Some(PathBuf::from(dir)),
            None => home.map(PathBuf::from),
        }
    }

    /// Change the working directory, naming `target` on failure.
    pub fn change_directory(target: &Path) -> HalResult<()> {
        nix::unistd::chdir(target).map_err(|errno| {
            HalError::io_error("chdir", Some(&target.to_string_lossy()), errno)
        })
    }
}

impl Builtin for CdBuiltin {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(
        &self,
        _state: &mut ShellState,
        first_arg: Option<&str>,
        _out: &mut dyn Write,
    ) -> ShellResult<BuiltinOutcome> {
        let Some(target) = Self::target(first_arg, std::env::var_os("HOME")) else {
            eprintln!("cd: HOME not set");
            return Ok(BuiltinOutcome::Handled);
        };

        match Self::change_directory(&target) {
            Ok(()) => {
                mish_log_debug!(directory = %target.display(), "changed directory");
            }
            Err(e) => eprintln!("{e}"),
        }
        Ok(BuiltinOutcome::Handled)
    }
}
