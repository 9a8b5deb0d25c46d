//! wait-cmd command: rerun a program until it exits 0.

use anyhow::{Context, Result};
use infratest_core::retry::{RetryPolicy, TracingLog};
use infratest_core::shell::{run_command_with_retry, ShellCommand};

pub fn run_wait_cmd(command: &[String], policy: &RetryPolicy) -> Result<()> {
    let (program, args) = command.split_first().context("no command given")?;
    let cmd = ShellCommand::new(program.as_str()).args(args.iter().cloned());
    let stdout = run_command_with_retry(&cmd, policy, &TracingLog)?;
    print!("{}", stdout);
    Ok(())
}
