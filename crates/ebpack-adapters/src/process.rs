//! Synchronous process execution using `std::process`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use ebpack_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::EbpackResult,
};

/// Runs commands to completion and captures their output. No timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(program = %program.display(), cwd = %cwd.display()))]
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> EbpackResult<CommandOutput> {
        let command_line = render_command(program, args);
        debug!(command = %command_line, "Running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command_line.clone(),
                status: "failed to start".into(),
                stderr: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ApplicationError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        debug!(stdout = %stdout.trim(), "Command finished");
        Ok(CommandOutput { stdout, stderr })
    }
}

fn render_command(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    #[test]
    fn captures_stdout_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = ProcessRunner
            .run(&sh(), &["-c".into(), "pwd".into()], dir.path())
            .unwrap();

        let reported = PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessRunner
            .run(
                &sh(),
                &["-c".into(), "echo nope >&2; exit 3".into()],
                dir.path(),
            )
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("nope"), "{msg}");
        assert!(msg.contains('3'), "{msg}");
    }

    #[test]
    fn missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessRunner
            .run(
                Path::new("/nonexistent/docker"),
                &["--version".into()],
                dir.path(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn command_line_is_rendered_for_messages() {
        assert_eq!(
            render_command(Path::new("docker"), &["--version".into()]),
            "docker --version"
        );
    }
}
