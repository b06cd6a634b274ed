//! External process execution.
//!
//! [`CommandRunner::run`] is the only place where process semantics (spawn
//! errors, exit codes, raw output bytes) are turned into a value the
//! orchestrators inspect. It never fails and never panics: every outcome is a
//! [`CommandResult`].

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Fixed stderr text used when the program cannot be located.
pub const PROGRAM_NOT_FOUND: &str =
    "Command not found. Make sure the program is installed and on your PATH.";

// ---------------------------------------------------------------------------
// CommandResult
// ---------------------------------------------------------------------------

/// Outcome of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub success: bool,
    /// Captured stdout, surrounding whitespace trimmed.
    pub stdout: String,
    /// Captured stderr, surrounding whitespace trimmed.
    pub stderr: String,
    /// Exit code. `None` when the process never started or was killed by a signal.
    pub code: Option<i32>,
    /// `false` when the program could not be spawned at all.
    pub launched: bool,
}

impl CommandResult {
    /// A process that ran and exited zero.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
            launched: true,
        }
    }

    /// A process that ran and exited with status 1.
    pub fn failed(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
            code: Some(1),
            launched: true,
        }
    }

    /// The program could not be located.
    pub fn not_found() -> Self {
        Self::not_launched(PROGRAM_NOT_FOUND)
    }

    fn not_launched(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
            code: None,
            launched: false,
        }
    }

    /// True when stdout or stderr contains `needle` (case-sensitive).
    pub fn mentions(&self, needle: &str) -> bool {
        self.stdout.contains(needle) || self.stderr.contains(needle)
    }
}

// ---------------------------------------------------------------------------
// CommandRunner
// ---------------------------------------------------------------------------

/// Runs an argument vector whose first element is the program name.
pub trait CommandRunner {
    /// Spawn, wait, and capture.
    ///
    /// With `capture_output == false` the child inherits the terminal and the
    /// returned stdout/stderr are empty. With `enforce_zero_exit == false`,
    /// `success` only reports that the process was launched and waited on.
    fn run(&self, argv: &[&str], capture_output: bool, enforce_zero_exit: bool) -> CommandResult;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, argv: &[&str], capture_output: bool, enforce_zero_exit: bool) -> CommandResult {
        (**self).run(argv, capture_output, enforce_zero_exit)
    }
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    current_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Runner that inherits the caller's working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose children start in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, argv: &[&str], capture_output: bool, enforce_zero_exit: bool) -> CommandResult {
        let Some((program, args)) = argv.split_first() else {
            return CommandResult::not_found();
        };

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        if !capture_output {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        tracing::debug!(argv = %argv.join(" "), "spawning");
        let output = match command.output() {
            Ok(output) => output,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(program, "program not found");
                return CommandResult::not_found();
            }
            Err(err) => {
                tracing::debug!(program, error = %err, "spawn failed");
                return CommandResult::not_launched(err.to_string());
            }
        };

        let result = into_result(output, enforce_zero_exit);
        tracing::debug!(code = ?result.code, success = result.success, "process exited");
        result
    }
}

fn into_result(output: Output, enforce_zero_exit: bool) -> CommandResult {
    let success = !enforce_zero_exit || output.status.success();
    CommandResult {
        success,
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        code: output.status.code(),
        launched: true,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<&str> {
        vec!["sh", "-c", script]
    }

    #[test]
    fn zero_exit_is_success_with_trimmed_output() {
        let result = ProcessRunner::new().run(&sh("printf '  hello\\n\\n'"), true, true);
        assert!(result.success);
        assert_eq!(result.stdout, "hello");
        assert_eq!(result.code, Some(0));
        assert!(result.launched);
    }

    #[test]
    fn non_zero_exit_is_reported_not_raised() {
        let result = ProcessRunner::new().run(&sh("echo out; echo err >&2; exit 3"), true, true);
        assert!(!result.success);
        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
        assert_eq!(result.code, Some(3));
    }

    #[test]
    fn non_zero_exit_counts_as_launched_when_not_enforced() {
        let result = ProcessRunner::new().run(&sh("exit 3"), true, false);
        assert!(result.success);
        assert_eq!(result.code, Some(3));
    }

    #[test]
    fn missing_program_yields_fixed_message() {
        let result = ProcessRunner::new().run(&["repohand-no-such-program-xyz"], true, true);
        assert!(!result.success);
        assert!(!result.launched);
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr, PROGRAM_NOT_FOUND);
    }

    #[test]
    fn empty_argv_is_treated_as_missing_program() {
        let result = ProcessRunner::new().run(&[], true, true);
        assert_eq!(result, CommandResult::not_found());
    }

    #[test]
    fn in_dir_runs_child_in_that_directory() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let result = ProcessRunner::in_dir(dir.path()).run(&sh("pwd"), true, true);
        let expected = dir.path().canonicalize().expect("canonical");
        let got = std::path::Path::new(&result.stdout)
            .canonicalize()
            .expect("canonical pwd");
        assert_eq!(got, expected);
    }

    #[test]
    fn uncaptured_output_leaves_result_empty() {
        let result = ProcessRunner::new().run(&sh("true"), false, true);
        assert!(result.success);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn mentions_searches_both_streams() {
        let result = CommandResult::failed("CONFLICT here", "could not apply; fix conflict");
        assert!(result.mentions("conflict"));
        assert!(result.mentions("CONFLICT"));
        assert!(!result.mentions("upstream"));
    }
}
