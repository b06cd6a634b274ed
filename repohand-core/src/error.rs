//! Error types for repohand-core.

use thiserror::Error;

/// Failure reading from or writing to the terminal.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Underlying I/O failure on stdin, stdout, or stderr.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an orchestrator stopped before reaching its normal end.
///
/// Every variant maps to process exit code 1. The user-facing explanation
/// has already been printed by the time a `Halt` is returned, except for
/// [`Halt::Console`], which the binary reports itself.
#[derive(Debug, Error)]
pub enum Halt {
    /// An unrecoverable condition; guidance was printed.
    #[error("aborted")]
    Fatal,

    /// Input ended (EOF) or the user interrupted a prompt.
    #[error("cancelled by user")]
    Interrupted,

    /// The terminal itself failed.
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

impl Halt {
    /// Process exit status for this halt.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
