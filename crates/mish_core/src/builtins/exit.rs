//! `exit` builtin – leave the shell.
//! Usage: `exit`. Arguments are ignored.

use super::{Builtin, BuiltinOutcome};
use crate::context::ShellState;
use crate::error::ShellResult;
use std::io::Write;

pub struct ExitBuiltin;

impl Builtin for ExitBuiltin {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(
        &self,
        _state: &mut ShellState,
        _first_arg: Option<&str>,
        _out: &mut dyn Write,
    ) -> ShellResult<BuiltinOutcome> {
        Ok(BuiltinOutcome::TerminateRequested)
    }
}
