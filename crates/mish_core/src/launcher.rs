//! Forking and running external commands.

use crate::context::ShellState;
use crate::error::ShellResult;
use crate::redirect::child_spec;
use crate::status::{report_status, Notice};
use crate::{mish_log_debug, mish_log_warn};
use mish_hal::{Pid, ProcessStatus};
use mish_parser::CommandSpec;
use std::io::Write;

/// What happened to a launched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Running in the background under this pid
    Background(Pid),
    /// Ran in the foreground and ended like this
    Foreground(ProcessStatus),
    /// No process was created
    NotStarted,
}

/// Run `command` as a child process.
///
/// Background launches report the pid and are added to the job table;
/// everything else is waited for, recorded as the last foreground status,
/// and reported if a signal killed it. A mode toggle deferred while the
/// child ran is applied before returning.
pub fn launch<W: Write>(
    state: &mut ShellState,
    command: &CommandSpec,
    out: &mut W,
) -> ShellResult<LaunchOutcome> {
    let outcome = run_child(state, command, out);
    state.mode_controller().apply_toggle_if_pending();
    outcome
}

fn run_child<W: Write>(
    state: &mut ShellState,
    command: &CommandSpec,
    out: &mut W,
) -> ShellResult<LaunchOutcome> {
    // Decided once, so a toggle arriving mid-launch cannot split the decision.
    let background = command.background && state.mode.background_allowed();
    let spec = child_spec(command, background, state.null_device())?;

    if !background {
        // Set before fork so the handler defers any toggle from here on.
        state.mode.set_foreground_running(true);
    }
    out.flush()?;

    let pid = match mish_hal::spawn(&spec) {
        Ok(pid) => pid,
        Err(e) => {
            state.mode.set_foreground_running(false);
            mish_log_warn!(command = %spec, error = %e, "fork failed");
            eprintln!("{e}");
            return Ok(LaunchOutcome::NotStarted);
        }
    };

    if background {
        writeln!(out, "background pid is {pid}")?;
        out.flush()?;
        if !state.jobs.insert(pid) {
            mish_log_debug!(%pid, "background job left untracked");
        }
        mish_log_debug!(%pid, command = %spec, "started background job");
        return Ok(LaunchOutcome::Background(pid));
    }

    let waited = mish_hal::wait_for(pid);
    state.mode.set_foreground_running(false);
    let status = waited?;
    mish_log_debug!(%pid, ?status, "foreground job finished");

    state.last_foreground_status = status;
    report_status(out, status, Notice::AfterForeground)?;
    Ok(LaunchOutcome::Foreground(status))
}
