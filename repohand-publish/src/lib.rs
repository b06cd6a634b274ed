//! # repohand-publish
//!
//! Stage every change, rebase onto `origin`, commit, and push, with guidance
//! for the common ways each step fails.
//!
//! Call [`run`] with a [`Git`](repohand_core::Git) and a
//! [`Console`](repohand_core::Console).

pub mod failure;
pub mod pipeline;
pub mod remote;

pub use failure::{CommitFailure, PullFailure, PushFailure};
pub use pipeline::{run, PublishOutcome, DEFAULT_COMMIT_MESSAGE};
pub use remote::RemoteSetup;
