//! mish Hardware Abstraction Layer (HAL)
//!
//! This crate contains every direct call into the operating system that the
//! shell makes: installing signal dispositions, writing from a signal handler,
//! and forking, redirecting and executing child processes.
//!
//! The HAL is designed to:
//! - Keep `unsafe` confined to the fork and sigaction boundaries
//! - Build every allocation a child needs before `fork`, so the child only
//!   performs async-signal-safe calls until `exec` or `_exit`
//! - Give the core crate a small, typed surface (`ChildSpec`, `ProcessStatus`)

pub mod error;
pub mod process;
pub mod signal;

pub use error::{HalError, HalResult};
pub use nix::sys::signal::Signal;
pub use nix::unistd::Pid;
pub use process::{
    send_signal, shell_pid, spawn, try_reap_any, wait_for, ChildSpec, ProcessStatus, Redirect,
};
pub use signal::{ignore, install_handler, raw_write, STDERR_FD, STDOUT_FD};
