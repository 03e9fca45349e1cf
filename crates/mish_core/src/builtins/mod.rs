//! Built-in commands for mish
//!
//! Built-ins run inside the shell process itself, without forking. They
//! ignore redirections and a trailing `&`.

use crate::context::ShellState;
use crate::error::ShellResult;
use std::io::Write;

pub mod cd;
pub mod exit;
pub mod status;

pub use cd::CdBuiltin;
pub use exit::ExitBuiltin;
pub use status::StatusBuiltin;

/// Result of offering a command to the built-in dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    /// `exit`: the caller terminates every tracked job, then the shell
    TerminateRequested,
    /// The built-in ran; go back to the prompt
    Handled,
    /// Not a built-in; launch it as a program
    NotBuiltin,
}

pub trait Builtin: Send + Sync {
    /// Get the name of the builtin
    fn name(&self) -> &'static str;

    /// Execute the builtin. Only the first argument is ever consulted.
    fn execute(
        &self,
        state: &mut ShellState,
        first_arg: Option<&str>,
        out: &mut dyn Write,
    ) -> ShellResult<BuiltinOutcome>;
}

static BUILTINS: [&dyn Builtin; 3] = [&ExitBuiltin, &CdBuiltin, &StatusBuiltin];

pub fn lookup(name: &str) -> Option<&'static dyn Builtin> {
    BUILTINS.iter().copied().find(|builtin| builtin.name() == name)
}

/// Run `command` if it names a built-in.
pub fn try_builtin(
    state: &mut ShellState,
    command: &str,
    first_arg: Option<&str>,
    out: &mut dyn Write,
) -> ShellResult<BuiltinOutcome> {
    match lookup(command) {
        Some(builtin) => builtin.execute(state, first_arg, out),
        None => Ok(BuiltinOutcome::NotBuiltin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::mode::ModeFlags;
    use mish_hal::ProcessStatus;

    fn state() -> ShellState {
        let flags: &'static ModeFlags = Box::leak(Box::new(ModeFlags::new()));
        ShellState::with_mode(&ShellConfig::default(), flags).unwrap()
    }

    #[test]
    fn test_registry() {
        for name in ["exit", "cd", "status"] {
            assert_eq!(lookup(name).map(|b| b.name()), Some(name));
        }
        assert!(lookup("ls").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_exit_requests_termination() {
        let mut out = Vec::new();
        let outcome = try_builtin(&mut state(), "exit", None, &mut out).unwrap();
        assert_eq!(outcome, BuiltinOutcome::TerminateRequested);
        assert!(out.is_empty());
    }

    #[test]
    fn test_status_reports_last_foreground_status() {
        let mut state = state();
        let mut out = Vec::new();
        try_builtin(&mut state, "status", None, &mut out).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "exit value 0\n");

        state.last_foreground_status = ProcessStatus::Signaled(15);
        out.clear();
        let outcome = try_builtin(&mut state, "status", Some("ignored"), &mut out).unwrap();
        assert_eq!(outcome, BuiltinOutcome::Handled);
        assert_eq!(String::from_utf8_lossy(&out), "terminated by signal 15\n");
    }

    #[test]
    fn test_unknown_command_is_not_builtin() {
        let mut out = Vec::new();
        let outcome = try_builtin(&mut state(), "status2", None, &mut out).unwrap();
        assert_eq!(outcome, BuiltinOutcome::NotBuiltin);
    }
}
