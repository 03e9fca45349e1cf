//! `status` builtin – report how the last foreground command ended.

use super::{Builtin, BuiltinOutcome};
use crate::context::ShellState;
use crate::error::ShellResult;
use crate::status::{report_status, Notice};
use std::io::Write;

pub struct StatusBuiltin;

impl Builtin for StatusBuiltin {
    fn name(&self) -> &'static str {
        "status"
    }

    fn execute(
        &self,
        state: &mut ShellState,
        _first_arg: Option<&str>,
        out: &mut dyn Write,
    ) -> ShellResult<BuiltinOutcome> {
        report_status(out, state.last_foreground_status, Notice::Verbose)?;
        Ok(BuiltinOutcome::Handled)
    }
}
