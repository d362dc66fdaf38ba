//! Execution of command lines through the host shell.

use std::io;
use std::process::{Command, ExitStatus};

/// Runs one command line to completion and returns its exit code.
pub trait CommandRunner {
    /// Runs `command_line`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be started.
    fn run(&mut self, command_line: &str) -> io::Result<i32>;
}

/// Runs commands through `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&mut self, command_line: &str) -> io::Result<i32> {
        tracing::debug!(command_line, "Running through shell");
        let status = shell_command(command_line).status()?;
        Ok(exit_code(status))
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // cmd strips the outer quotes and keeps the ones inside.
    let mut command = Command::new("cmd");
    command.arg("/C").raw_arg(format!("\"{command_line}\""));
    command
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

/// Exit code of a finished process; termination by signal `n` maps to `-n`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
