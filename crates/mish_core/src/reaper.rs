//! Collecting finished background jobs at the top of each prompt cycle.

use crate::context::ShellState;
use crate::error::ShellResult;
use crate::mish_log_debug;
use crate::status::{report_status, Notice};
use std::io::Write;

/// Reap every child that has already terminated, without blocking.
///
/// Each one is announced, dropped from the job table and its status
/// reported in full. Returns how many were reaped.
pub fn reap_completed<W: Write>(state: &mut ShellState, out: &mut W) -> ShellResult<usize> {
    let mut reaped = 0;
    while let Some((pid, status)) = mish_hal::try_reap_any()? {
        write!(out, "background pid {pid} is done: ")?;
        out.flush()?;
        if !state.jobs.remove(pid) {
            mish_log_debug!(%pid, "reaped a child that was not in the job table");
        }
        report_status(out, status, Notice::Verbose)?;
        reaped += 1;
    }
    Ok(reaped)
}
