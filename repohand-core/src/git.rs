//! The version-control program and the printing conveniences built on
//! [`CommandRunner`].

use crate::console::{Console, Tone};
use crate::error::Halt;
use crate::runner::{CommandResult, CommandRunner};

/// Executable used when none is given on the command line.
pub const DEFAULT_PROGRAM: &str = "git";

/// A [`CommandRunner`] bound to one version-control executable.
#[derive(Debug, Clone)]
pub struct Git<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, DEFAULT_PROGRAM)
    }

    pub fn with_program(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Full argument vector including the program, joined for display.
    pub fn display(&self, args: &[&str]) -> String {
        let mut parts = Vec::with_capacity(args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend_from_slice(args);
        parts.join(" ")
    }

    /// Capture and enforce a zero exit, printing nothing.
    pub fn probe(&self, args: &[&str]) -> CommandResult {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(self.program.as_str());
        argv.extend_from_slice(args);
        self.runner.run(&argv, true, true)
    }

    /// Run and echo the outcome.
    ///
    /// Prints `--- message ---` first when given, then any stdout and stderr
    /// the command produced, then a failure line if it did not succeed.
    /// `fatal` turns that failure into [`Halt::Fatal`].
    pub fn run_and_print(
        &self,
        console: &mut dyn Console,
        args: &[&str],
        message: Option<&str>,
        fatal: bool,
    ) -> Result<CommandResult, Halt> {
        if let Some(message) = message {
            console.banner(message)?;
        }

        let result = self.probe(args);
        if !result.stdout.is_empty() {
            console.say(&result.stdout)?;
        }
        if !result.stderr.is_empty() {
            console.say(&result.stderr)?;
        }

        if !result.success {
            console.emit(
                Tone::Failure,
                &format!("Command failed: {}", self.display(args)),
            )?;
            if fatal {
                return Err(Halt::Fatal);
            }
        }
        Ok(result)
    }

    /// Run for its stdout.
    ///
    /// On failure prints a diagnostic (with the stderr details when present)
    /// and either halts (`fatal`) or returns an empty string.
    pub fn output(
        &self,
        console: &mut dyn Console,
        args: &[&str],
        fatal: bool,
    ) -> Result<String, Halt> {
        let result = self.probe(args);
        if result.success {
            return Ok(result.stdout);
        }

        console.emit(
            Tone::Failure,
            &format!("Error while running: {}", self.display(args)),
        )?;
        if !result.stderr.is_empty() {
            console.say(&format!("Details: {}", result.stderr))?;
        }
        if fatal {
            return Err(Halt::Fatal);
        }
        Ok(String::new())
    }
}
