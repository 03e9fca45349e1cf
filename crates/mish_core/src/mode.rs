//! Foreground-only mode, toggled by the stop signal (Ctrl-Z).
//!
//! The signal handler and the main flow share three flags in [`ModeFlags`].
//! The handler only performs atomic loads and stores plus unbuffered writes
//! of static strings; everything else happens on the main flow.
//!
//! A toggle that arrives while the shell is waiting on a foreground child is
//! deferred: the handler records it and the launcher applies it, printing
//! the banner once, after the child has been reaped.

use mish_hal::signal::{raw_write, STDOUT_FD};
use nix::libc::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

/// Marker printed before every command line.
pub const PROMPT: &str = ": ";

/// Whether a trailing `&` is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    ForegroundOnly,
}

impl Mode {
    /// Message printed when the shell enters this mode.
    pub fn banner(self) -> &'static str {
        match self {
            Mode::Normal => "\nExiting foreground-only mode\n",
            Mode::ForegroundOnly => "\nEntering foreground-only mode (& is now ignored)\n",
        }
    }
}

/// Mode state shared between the main flow and the stop-signal handler.
#[derive(Debug)]
pub struct ModeFlags {
    background_allowed: AtomicBool,
    toggle_deferred: AtomicBool,
    foreground_running: AtomicBool,
}

impl ModeFlags {
    pub const fn new() -> Self {
        Self {
            background_allowed: AtomicBool::new(true),
            toggle_deferred: AtomicBool::new(false),
            foreground_running: AtomicBool::new(false),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.background_allowed() {
            Mode::Normal
        } else {
            Mode::ForegroundOnly
        }
    }

    pub fn background_allowed(&self) -> bool {
        self.background_allowed.load(Ordering::SeqCst)
    }

    pub fn foreground_running(&self) -> bool {
        self.foreground_running.load(Ordering::SeqCst)
    }

    /// Must be set before forking a foreground child and cleared once it
    /// has been waited for.
    pub fn set_foreground_running(&self, running: bool) {
        self.foreground_running.store(running, Ordering::SeqCst);
    }

    pub fn toggle_deferred(&self) -> bool {
        self.toggle_deferred.load(Ordering::SeqCst)
    }

    fn flip(&self) -> Mode {
        if self.background_allowed.fetch_xor(true, Ordering::SeqCst) {
            Mode::ForegroundOnly
        } else {
            Mode::Normal
        }
    }

    /// Record a stop signal. Async-signal-safe.
    ///
    /// With no foreground child running the mode flips now and the new mode
    /// is returned; otherwise the flip is deferred and `None` is returned.
    pub fn signal_toggle_requested(&self) -> Option<Mode> {
        if self.foreground_running() {
            self.toggle_deferred.store(true, Ordering::SeqCst);
            None
        } else {
            Some(self.flip())
        }
    }

    /// Apply a deferred toggle, if there is one, and return the new mode.
    pub fn consume_pending_toggle(&self) -> Option<Mode> {
        if self.toggle_deferred.swap(false, Ordering::SeqCst) {
            Some(self.flip())
        } else {
            None
        }
    }
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide instance; the only one the signal handler can reach.
pub static SHELL_MODE: ModeFlags = ModeFlags::new();

/// Destination of mode banners.
///
/// Implementations used from the signal handler must not allocate or lock.
pub trait BannerSink {
    fn emit(&self, bytes: &[u8]);
}

/// Unbuffered standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStdout;

impl BannerSink for RawStdout {
    fn emit(&self, bytes: &[u8]) {
        raw_write(STDOUT_FD, bytes);
    }
}

/// Applies mode transitions and prints their banners.
pub struct ModeController<'a, S: BannerSink = RawStdout> {
    flags: &'a ModeFlags,
    sink: S,
}

impl<'a> ModeController<'a, RawStdout> {
    pub fn new(flags: &'a ModeFlags) -> Self {
        Self::with_sink(flags, RawStdout)
    }
}

impl<'a, S: BannerSink> ModeController<'a, S> {
    pub fn with_sink(flags: &'a ModeFlags, sink: S) -> Self {
        Self { flags, sink }
    }

    /// Entry point for the stop-signal handler.
    ///
    /// When idle the prompt was already on screen, so it is printed again
    /// after the banner.
    pub fn request_toggle(&self) {
        if let Some(mode) = self.flags.signal_toggle_requested() {
            self.sink.emit(mode.banner().as_bytes());
            self.sink.emit(PROMPT.as_bytes());
        }
    }

    /// Called by the launcher right after a child has been handled.
    pub fn apply_toggle_if_pending(&self) -> Option<Mode> {
        let mode = self.flags.consume_pending_toggle()?;
        self.sink.emit(mode.banner().as_bytes());
        Some(mode)
    }
}

/// Stop-signal handler installed at startup.
pub extern "C" fn on_stop_signal(_signo: c_int) {
    ModeController::new(&SHELL_MODE).request_toggle();
}
