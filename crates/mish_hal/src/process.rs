//! Child process creation, waiting and signalling.
//!
//! A [`ChildSpec`] carries everything the child needs already converted to
//! C strings. [`spawn`] forks; the child applies its signal dispositions and
//! redirections and replaces itself with the target program, and the parent
//! gets the pid back. Failures inside the child are written to standard
//! error with raw writes and end the child with status 1.

use crate::error::{HalError, HalResult};
use crate::signal::{self, STDERR_FD, STDIN_FD, STDOUT_FD};
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::signal::{kill, SigHandler, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{close, dup2, execvp, fork, getpid, ForkResult, Pid};
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;


/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Process called `exit` with this value
    Exited(i32),
    /// Process was terminated by this signal number
    Signaled(i32),
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Exited(0)
    }
}

impl ProcessStatus {
    fn from_wait_status(status: WaitStatus) -> Option<(Pid, Self)> {
        match status {
            WaitStatus::Exited(pid, code) => Some((pid, ProcessStatus::Exited(code))),
            WaitStatus::Signaled(pid, sig, _core_dumped) => {
                Some((pid, ProcessStatus::Signaled(sig as i32)))
            }
            _ => None,
        }
    }
}

/// Where one of the child's standard streams comes from or goes to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Redirect {
    /// Keep the descriptor inherited from the shell
    #[default]
    Inherit,
    /// The discard device; opened without creating or truncating
    Discard(CString),
    /// A file named by the user
    File(CString),
}

impl Redirect {
    pub fn discard(path: &Path) -> HalResult<Self> {
        Ok(Redirect::Discard(path_to_cstring(path)?))
    }

    pub fn file(path: &Path) -> HalResult<Self> {
        Ok(Redirect::File(path_to_cstring(path)?))
    }
}

/// Which of the two standard streams a redirect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Input,
    Output,
}

impl Stream {
    fn target_fd(self) -> RawFd {
        match self {
            Stream::Input => STDIN_FD,
            Stream::Output => STDOUT_FD,
        }
    }

    fn open_flags(self, redirect: &Redirect) -> OFlag {
        match (self, redirect) {
            (Stream::Input, _) => OFlag::O_RDONLY,
            (Stream::Output, Redirect::File(_)) => {
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC
            }
            (Stream::Output, _) => OFlag::O_WRONLY,
        }
    }

    fn label(self) -> &'static [u8] {
        match self {
            Stream::Input => b"input",
            Stream::Output => b"output",
        }
    }
}

/// A fully prepared description of a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSpec {
    argv: Vec<CString>,
    stdin: Redirect,
    stdout: Redirect,
    foreground: bool,
}

impl ChildSpec {
    /// Create a spec from an argument vector whose first element is the
    /// program name.
    pub fn new<S: AsRef<str>>(argv: &[S]) -> HalResult<Self> {
        if argv.is_empty() {
            return Err(HalError::invalid("empty argument vector"));
        }
        let argv = argv
            .iter()
            .map(|arg| CString::new(arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            argv,
            stdin: Redirect::Inherit,
            stdout: Redirect::Inherit,
            foreground: true,
        })
    }

    /// Set stdin
    pub fn stdin(mut self, stdin: Redirect) -> Self {
        self.stdin = stdin;
        self
    }

    /// Set stdout
    pub fn stdout(mut self, stdout: Redirect) -> Self {
        self.stdout = stdout;
        self
    }

    /// Foreground children get the default interrupt action back; background
    /// children keep the shell's ignored disposition.
    pub fn foreground(mut self, foreground: bool) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn program(&self) -> &CStr {
        &self.argv[0]
    }

    pub fn argv(&self) -> &[CString] {
        &self.argv
    }

    pub fn stdin_redirect(&self) -> &Redirect {
        &self.stdin
    }

    pub fn stdout_redirect(&self) -> &Redirect {
        &self.stdout
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground
    }
}

impl fmt::Display for ChildSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<_> = self.argv.iter().map(|a| a.to_string_lossy()).collect();
        write!(f, "{}", words.join(" "))
    }
}

fn path_to_cstring(path: &Path) -> HalResult<CString> {
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

/// The shell's own process id.
pub fn shell_pid() -> Pid {
    getpid()
}

/// Fork and run `spec` in the child. Returns the child's pid in the parent;
/// never returns in the child.
///
/// Callers should flush any buffered output first, since the child inherits
/// a copy of the parent's memory.
pub fn spawn(spec: &ChildSpec) -> HalResult<Pid> {
    // SAFETY: the child branch only makes async-signal-safe calls (sigaction,
    // open, dup2, close, write, execvp, _exit) on data prepared before fork.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(child),
        Ok(ForkResult::Child) => exec_child(spec),
        Err(errno) => Err(HalError::process_error("fork", None, errno)),
    }
}

fn exec_child(spec: &ChildSpec) -> ! {
    // The stop signal belongs to the shell's mode switch; no child is ever
    // suspended by it unless the program installs its own handler.
    let _ = signal::set_disposition_raw(Signal::SIGTSTP, SigHandler::SigIgn);
    if spec.foreground {
        let _ = signal::set_disposition_raw(Signal::SIGINT, SigHandler::SigDfl);
    }
    // The Rust runtime ignores SIGPIPE in the shell; programs expect the default.
    let _ = signal::set_disposition_raw(Signal::SIGPIPE, SigHandler::SigDfl);

    redirect(&spec.stdin, Stream::Input);
    redirect(&spec.stdout, Stream::Output);

    let errno = match execvp(spec.program(), spec.argv()) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    child_fail(&[spec.program().to_bytes(), b": ", errno.desc().as_bytes(), b"\n"])
}

fn redirect(redirect: &Redirect, stream: Stream) {
    let path = match redirect {
        Redirect::Inherit => return,
        Redirect::Discard(path) | Redirect::File(path) => path.as_c_str(),
    };

    let fd = match open(path, stream.open_flags(redirect), Mode::S_IRWXU) {
        Ok(fd) => fd,
        Err(errno) => match redirect {
            Redirect::File(_) => child_fail(&[
                b"cannot open ",
                path.to_bytes(),
                b" for ",
                stream.label(),
                b"\n",
            ]),
            _ => child_fail(&[path.to_bytes(), b": ", errno.desc().as_bytes(), b"\n"]),
        },
    };

    let target = stream.target_fd();
    if fd != target {
        if let Err(errno) = dup2(fd, target) {
            child_fail(&[
                b"dup2 ",
                stream.label(),
                b": ",
                errno.desc().as_bytes(),
                b"\n",
            ]);
        }
        let _ = close(fd);
    }
}

fn child_fail(pieces: &[&[u8]]) -> ! {
    signal::raw_write_all(STDERR_FD, pieces);
    // SAFETY: `_exit` skips atexit handlers and stdio flushing, which must not
    // run in a forked child.
    unsafe { nix::libc::_exit(1) }
}

/// Block until `pid` terminates. Stop and continue notifications are not
/// requested, and `EINTR` is retried.
pub fn wait_for(pid: Pid) -> HalResult<ProcessStatus> {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                if let Some((_, status)) = ProcessStatus::from_wait_status(status) {
                    return Ok(status);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(errno) => {
                return Err(HalError::process_error("waitpid", Some(pid.as_raw()), errno))
            }
        }
    }
}

/// Reap one terminated child of this process without blocking.
///
/// Returns `Ok(None)` when no child has terminated yet and when there are no
/// children at all.
pub fn try_reap_any() -> HalResult<Option<(Pid, ProcessStatus)>> {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => return Ok(None),
            Ok(status) => {
                if let Some(reaped) = ProcessStatus::from_wait_status(status) {
                    return Ok(Some(reaped));
                }
            }
            Err(Errno::ECHILD) => return Ok(None),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(HalError::process_error("waitpid", None, errno)),
        }
    }
}

/// Send `signal` to a single process.
pub fn send_signal(pid: Pid, signal: Signal) -> HalResult<()> {
    kill(pid, signal).map_err(|errno| HalError::process_error("kill", Some(pid.as_raw()), errno))
}
