//! Shell command runner
//!
//! `system()`-style execution: the command line goes through `sh -c`, stdio
//! is inherited, and the child's exit status comes back to the caller.

use crate::error::{Error, Result};
use std::process::{Command, ExitStatus, Output, Stdio};

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Run a command line through the shell, inheriting stdio.
pub fn run(command: &str) -> Result<ExitStatus> {
    shell(command).status().map_err(|e| Error::Spawn {
        command: command.to_string(),
        source: e,
    })
}

/// Run a command line through the shell, capturing stdout and stderr.
pub fn run_captured(command: &str) -> Result<Output> {
    shell(command)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::Spawn {
            command: command.to_string(),
            source: e,
        })
}

/// Exit code to forward for a finished child.
///
/// A signal-terminated child has no code; 127 mirrors the shell's own
/// convention for "command failed abnormally".
pub fn forward_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_succeeds() {
        let status = run("true").unwrap();
        assert!(status.success());
        assert_eq!(forward_code(status), 0);
    }

    #[test]
    fn exit_code_is_forwarded() {
        let status = run("exit 3").unwrap();
        assert!(!status.success());
        assert_eq!(forward_code(status), 3);
    }

    #[test]
    fn captured_output_is_returned() {
        let output = run_captured("echo hello").unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn missing_command_reports_through_shell() {
        // The shell itself spawns fine; the failure shows up as its exit code.
        let status = run("definitely_not_a_real_command_xyz 2>/dev/null").unwrap();
        assert_eq!(forward_code(status), 127);
    }
}
