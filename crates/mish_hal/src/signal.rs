//! Signal dispositions and async-signal-safe output.
//!
//! Everything here may be called from a forked child before `exec`, and
//! [`raw_write`] may also be called from inside a signal handler: none of
//! these functions allocate or take a lock.

use crate::error::{HalError, HalResult};
use nix::errno::Errno;
use nix::libc::c_int;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::os::unix::io::RawFd;

pub const STDIN_FD: RawFd = 0;
pub const STDOUT_FD: RawFd = 1;
pub const STDERR_FD: RawFd = 2;

/// Signature of a handler installed with [`install_handler`].
pub type RawHandler = extern "C" fn(c_int);

/// Change a disposition without allocating, for use between fork and exec.
pub(crate) fn set_disposition_raw(signal: Signal, handler: SigHandler) -> nix::Result<()> {
    // Every other signal is blocked while the handler runs, and reads and
    // waits interrupted by the handler are restarted by the kernel.
    let action = SigAction::new(handler, SaFlags::SA_RESTART, SigSet::all());
    // SAFETY: the only handlers installed through this module are
    // `extern "C"` functions that restrict themselves to atomics and
    // `raw_write`.
    unsafe { sigaction(signal, &action) }.map(|_| ())
}

fn set_disposition(signal: Signal, handler: SigHandler) -> HalResult<()> {
    set_disposition_raw(signal, handler)
        .map_err(|errno| HalError::signal_error("sigaction", signal, errno))
}

/// Route `signal` to `handler`.
pub fn install_handler(signal: Signal, handler: RawHandler) -> HalResult<()> {
    set_disposition(signal, SigHandler::Handler(handler))
}

/// Ignore `signal`. The disposition survives `exec`.
pub fn ignore(signal: Signal) -> HalResult<()> {
    set_disposition(signal, SigHandler::SigIgn)
}

/// Write `bytes` straight to `fd`, bypassing the buffered std handles.
///
/// Short writes are continued and `EINTR` retried; any other error drops
/// the rest of the message since there is nowhere left to report it.
pub fn raw_write(fd: RawFd, bytes: &[u8]) {
    let mut rest = bytes;
    while !rest.is_empty() {
        match nix::unistd::write(fd, rest) {
            Ok(0) => break,
            Ok(written) => rest = &rest[written..],
            Err(Errno::EINTR) => continue,
            Err(_) => break,
        }
    }
}

/// Write several pieces to `fd` in order without building an intermediate
/// buffer.
pub fn raw_write_all(fd: RawFd, pieces: &[&[u8]]) {
    for piece in pieces {
        raw_write(fd, piece);
    }
}
