//! repohand core library: process execution, console prompts, termination.
//!
//! - [`runner`] — [`CommandRunner`] and the std-process [`ProcessRunner`]
//! - [`git`] — [`Git`], a runner bound to the version-control executable
//! - [`console`] — [`Console`], yes/no and free-text prompts
//! - [`error`] — [`Halt`] and [`ConsoleError`]
//! - [`repo`] — metadata directory and remote name

pub mod console;
pub mod error;
pub mod git;
pub mod repo;
pub mod runner;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use console::{ask, confirm, Console, TermConsole, Tone, CANCELLED_BY_USER};
pub use error::{ConsoleError, Halt};
pub use git::Git;
pub use runner::{CommandResult, CommandRunner, ProcessRunner};
