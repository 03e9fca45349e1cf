//! Process-wide setup performed once before the first prompt.

use crate::error::ShellResult;
use crate::mish_log_debug;
use crate::mode::on_stop_signal;
use mish_hal::Signal;

/// The interrupt signal is ignored by the shell (foreground children get the
/// default back), and the stop signal toggles foreground-only mode.
pub fn install_signal_dispositions() -> ShellResult<()> {
    mish_hal::ignore(Signal::SIGINT)?;
    mish_hal::install_handler(Signal::SIGTSTP, on_stop_signal)?;
    mish_log_debug!("signal dispositions installed");
    Ok(())
}
