//! The read, dispatch and launch loop.

use crate::builtins::{try_builtin, BuiltinOutcome};
use crate::context::ShellState;
use crate::error::{ShellError, ShellResult};
use crate::launcher::launch;
use crate::mode::PROMPT;
use crate::reaper::reap_completed;
use crate::{mish_log_debug, mish_log_info, mish_log_warn};
use mish_parser::{expand_pid, is_blank_or_comment, parse_command, read_command_line};
use std::io::{self, BufRead, Write};

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct Shell {
    state: ShellState,
    pid: i32,
}

impl Shell {
    pub fn new(state: ShellState) -> Self {
        Self {
            state,
            pid: mish_hal::shell_pid().as_raw(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    /// Run until `exit` or end of input, then terminate every tracked
    /// background job.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> ShellResult<()> {
        let result = self.run_loop(&mut input);
        self.terminate_jobs();
        result
    }

    fn run_loop<R: BufRead>(&mut self, input: &mut R) -> ShellResult<()> {
        let stdout = io::stdout();
        loop {
            {
                let mut out = stdout.lock();
                if let Err(e) = reap_completed(&mut self.state, &mut out) {
                    report_error(&e);
                }
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }

            let Some(line) = read_command_line(input)? else {
                mish_log_info!("end of input");
                return Ok(());
            };

            let mut out = stdout.lock();
            match self.execute_line(&line, &mut out) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => return Ok(()),
                Err(e) => report_error(&e),
            }
        }
    }

    /// Handle one raw input line: skip blanks and comments, expand `$$`,
    /// parse, then run a built-in or launch a program.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> ShellResult<LoopControl> {
        if is_blank_or_comment(line) {
            return Ok(LoopControl::Continue);
        }
        let expanded = expand_pid(line, self.pid);
        let Some(command) = parse_command(&expanded)? else {
            return Ok(LoopControl::Continue);
        };

        match try_builtin(&mut self.state, command.program(), command.first_arg(), out)? {
            BuiltinOutcome::TerminateRequested => Ok(LoopControl::Exit),
            BuiltinOutcome::Handled => Ok(LoopControl::Continue),
            BuiltinOutcome::NotBuiltin => {
                launch(&mut self.state, &command, out)?;
                Ok(LoopControl::Continue)
            }
        }
    }

    fn terminate_jobs(&mut self) {
        let signal = self.state.exit_signal();
        let delivered = self.state.jobs.terminate_all(signal);
        mish_log_debug!(delivered, signal = signal.as_str(), "background jobs terminated");
    }
}

fn report_error(error: &ShellError) {
    mish_log_warn!(%error, "command failed");
    eprintln!("mish: {error}");
}
