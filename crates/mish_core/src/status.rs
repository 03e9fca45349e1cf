//! How a child's termination is reported to the user.

use mish_hal::ProcessStatus;
use std::io::{self, Write};

/// The context a status is being reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Implicit notice right after a foreground command: a normal exit is
    /// not worth mentioning, only a killing signal is.
    AfterForeground,
    /// The `status` built-in or a background completion: always reported.
    Verbose,
}

/// The line to print for `status`, or `None` when nothing is printed.
pub fn status_line(status: ProcessStatus, notice: Notice) -> Option<String> {
    match (status, notice) {
        (ProcessStatus::Exited(_), Notice::AfterForeground) => None,
        (ProcessStatus::Exited(code), Notice::Verbose) => Some(format!("exit value {code}")),
        (ProcessStatus::Signaled(signal), _) => Some(format!("terminated by signal {signal}")),
    }
}

/// Print `status` to `out` according to `notice`, flushing immediately.
pub fn report_status<W: Write + ?Sized>(
    out: &mut W,
    status: ProcessStatus,
    notice: Notice,
) -> io::Result<()> {
    if let Some(line) = status_line(status, notice) {
        writeln!(out, "{line}")?;
        out.flush()?;
    }
    Ok(())
}
