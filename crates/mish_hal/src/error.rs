//! Error handling for the mish HAL
//!
//! Every failing system call is captured with the operation that was being
//! attempted and the raw `errno`, so callers can report failures the way a
//! shell user expects (`path: No such file or directory`).

use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::fmt;
use std::result;

/// Result type for HAL operations
pub type HalResult<T> = result::Result<T, HalError>;

/// Error types for HAL operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// File or descriptor operation failed
    Io(IoError),
    /// Process creation, wait or kill failed
    Process(ProcessError),
    /// Changing a signal disposition failed
    Signal(SignalError),
    /// Invalid input (for example an argument with an interior NUL byte)
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoError {
    pub operation: String,
    pub path: Option<String>,
    pub errno: Errno,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessError {
    pub operation: String,
    pub pid: Option<i32>,
    pub errno: Errno,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalError {
    pub operation: String,
    pub signal: Signal,
    pub errno: Errno,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::Io(err) => match &err.path {
                Some(path) => write!(f, "{path}: {}", err.errno.desc()),
                None => write!(f, "{}: {}", err.operation, err.errno.desc()),
            },
            HalError::Process(err) => match err.pid {
                Some(pid) => write!(f, "{} (pid {pid}): {}", err.operation, err.errno.desc()),
                None => write!(f, "{}: {}", err.operation, err.errno.desc()),
            },
            HalError::Signal(err) => write!(
                f,
                "{} {}: {}",
                err.operation,
                err.signal.as_str(),
                err.errno.desc()
            ),
            HalError::Invalid(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for HalError {}

impl From<std::ffi::NulError> for HalError {
    fn from(err: std::ffi::NulError) -> Self {
        HalError::Invalid(format!("nul byte at position {}", err.nul_position()))
    }
}

// Helper functions for creating specific error types
impl HalError {
    pub fn io_error(operation: &str, path: Option<&str>, errno: Errno) -> Self {
        HalError::Io(IoError {
            operation: operation.to_string(),
            path: path.map(|s| s.to_string()),
            errno,
        })
    }

    pub fn process_error(operation: &str, pid: Option<i32>, errno: Errno) -> Self {
        HalError::Process(ProcessError {
            operation: operation.to_string(),
            pid,
            errno,
        })
    }

    pub fn signal_error(operation: &str, signal: Signal, errno: Errno) -> Self {
        HalError::Signal(SignalError {
            operation: operation.to_string(),
            signal,
            errno,
        })
    }

    pub fn invalid(msg: &str) -> Self {
        HalError::Invalid(msg.to_string())
    }

    /// The underlying `errno`, when the error came from a system call.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            HalError::Io(err) => Some(err.errno),
            HalError::Process(err) => Some(err.errno),
            HalError::Signal(err) => Some(err.errno),
            HalError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = HalError::io_error("chdir", Some("/nope"), Errno::ENOENT);
        assert_eq!(err.to_string(), "/nope: No such file or directory");
        assert_eq!(err.errno(), Some(Errno::ENOENT));
    }

    #[test]
    fn process_error_without_pid_names_the_operation() {
        let err = HalError::process_error("fork", None, Errno::EAGAIN);
        assert!(err.to_string().starts_with("fork: "));
    }

    #[test]
    fn nul_error_is_invalid_input() {
        let nul = std::ffi::CString::new("a\0b").unwrap_err();
        let err = HalError::from(nul);
        assert_eq!(err, HalError::Invalid("nul byte at position 1".to_string()));
        assert_eq!(err.errno(), None);
    }
}
