//! Standard stream policy for launched commands.
//!
//! Explicit `<` and `>` targets always win. A genuine background launch
//! (requested with `&` while background jobs are allowed) that leaves a
//! stream unspecified gets the null device instead, so an unattended job
//! never reads from or writes to the terminal. Foreground launches inherit
//! the shell's streams.

use crate::error::ShellResult;
use mish_hal::{ChildSpec, Redirect};
use mish_parser::CommandSpec;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPlan {
    pub stdin: Redirect,
    pub stdout: Redirect,
}

impl RedirectPlan {
    pub fn for_command(
        command: &CommandSpec,
        background: bool,
        null_device: &Path,
    ) -> ShellResult<Self> {
        Ok(Self {
            stdin: stream(command.input(), background, null_device)?,
            stdout: stream(command.output(), background, null_device)?,
        })
    }
}

fn stream(explicit: Option<&Path>, background: bool, null_device: &Path) -> ShellResult<Redirect> {
    let redirect = match explicit {
        Some(path) => Redirect::file(path)?,
        None if background => Redirect::discard(null_device)?,
        None => Redirect::Inherit,
    };
    Ok(redirect)
}

/// Everything the child needs, built before forking.
pub fn child_spec(
    command: &CommandSpec,
    background: bool,
    null_device: &Path,
) -> ShellResult<ChildSpec> {
    let plan = RedirectPlan::for_command(command, background, null_device)?;
    Ok(ChildSpec::new(&command.argv)?
        .stdin(plan.stdin)
        .stdout(plan.stdout)
        .foreground(!background))
}
