//! Stage, sync, commit, and push.
//!
//! ## Stages
//!
//! 1. Preflight: the git program answers `--version`; `.git` exists.
//! 2. Remote: confirm, replace, or add `origin`.
//! 3. Change detection: `status --porcelain`; a clean tree ends the run.
//! 4. Staging: `add .`.
//! 5. Sync: `pull --rebase origin <branch>`.
//! 6. Commit: prompted message, default when empty.
//! 7. Push: `push origin <branch>`, with guidance per failure category.
//!
//! Stages 1 through 6 stop the run with [`Halt`] on failure. Push failures
//! end the run normally as [`PublishOutcome::PushNotCompleted`].

use std::path::Path;

use repohand_core::repo::{self, REMOTE};
use repohand_core::{ask, confirm, CommandRunner, Console, Git, Halt, Tone, CANCELLED_BY_USER};

use crate::failure::{
    classify_commit, classify_pull, classify_push, CommitFailure, PullFailure, PushFailure,
};
use crate::remote;

/// Commit message used when the prompt is left empty.
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: automatic update";

const PAT_DOCS: &str = "https://docs.github.com/en/authentication/keeping-your-account-and-data-secure/managing-your-personal-access-tokens";

/// How a run that did not halt ended. All of these exit with status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The working tree had no changes.
    NothingToDo,
    /// The branch was pushed; `url` is its browsable location.
    Published { branch: String, url: String },
    /// The push failed or the upstream retry was declined; guidance was shown.
    PushNotCompleted { branch: String, failure: PushFailure },
}

/// Run every stage in order against `workdir`.
pub fn run<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    workdir: &Path,
) -> Result<PublishOutcome, Halt> {
    let outcome = stages(git, console, workdir);
    if let Err(Halt::Interrupted) = outcome {
        console.say(CANCELLED_BY_USER)?;
    }
    outcome
}

fn stages<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    workdir: &Path,
) -> Result<PublishOutcome, Halt> {
    preflight(git, console, workdir)?;

    console.banner("Starting the automated Git process")?;

    let setup = remote::configure(git, console)?;
    let Some(url) = setup.url() else {
        console.emit(
            Tone::Failure,
            "Unable to configure the remote repository. Aborting.",
        )?;
        return Err(Halt::Fatal);
    };
    tracing::info!(?setup, %url, "remote ready");

    console.banner("Checking for changes and staging")?;
    if !has_pending_changes(git, console)? {
        console.say("No changes detected in the working directory. Nothing to commit.")?;
        tracing::info!("working tree clean");
        return Ok(PublishOutcome::NothingToDo);
    }
    stage(git, console)?;

    sync(git, console)?;
    commit(git, console)?;
    push(git, console)
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

fn preflight<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    workdir: &Path,
) -> Result<(), Halt> {
    console.say("Checking the Git installation...")?;
    if !git.probe(&["--version"]).success {
        console.emit(
            Tone::Failure,
            "Error: Git is not installed or not reachable on your PATH.",
        )?;
        console.say("Please install Git to continue.")?;
        return Err(Halt::Fatal);
    }
    console.emit(Tone::Success, "Git is installed and detected.")?;

    if !repo::is_managed(workdir) {
        console.emit(
            Tone::Failure,
            "Error: this command must be run at the root of a Git repository.",
        )?;
        return Err(Halt::Fatal);
    }
    Ok(())
}

/// Staged, unstaged, or untracked changes present.
fn has_pending_changes<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
) -> Result<bool, Halt> {
    let status = git.output(console, &["status", "--porcelain"], false)?;
    Ok(!status.trim().is_empty())
}

fn stage<R: CommandRunner>(git: &Git<R>, console: &mut dyn Console) -> Result<(), Halt> {
    console.say("Changes detected. Staging all files (`git add .`).")?;
    git.run_and_print(console, &["add", "."], None, true)?;
    console.emit(Tone::Success, "Files staged successfully.")?;
    Ok(())
}

fn current_branch<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
) -> Result<String, Halt> {
    git.output(console, &["rev-parse", "--abbrev-ref", "HEAD"], true)
}

fn sync<R: CommandRunner>(git: &Git<R>, console: &mut dyn Console) -> Result<(), Halt> {
    console.banner("Syncing with the remote (`git pull --rebase`)")?;
    let branch = current_branch(git, console)?;
    let result = git.run_and_print(console, &["pull", "--rebase", REMOTE, &branch], None, false)?;

    if result.success {
        console.emit(Tone::Success, "Sync completed successfully.")?;
        return Ok(());
    }

    let failure = classify_pull(&result);
    tracing::info!(?failure, %branch, "pull --rebase failed");
    match failure {
        PullFailure::Conflict => {
            console.emit(
                Tone::Failure,
                "Merge conflict detected. Resolve the conflicts manually, then run \
                 `git rebase --continue` and rerun this command.",
            )?;
            console.say("Use `git status` to see the conflicting files.")?;
            Err(Halt::Fatal)
        }
        PullFailure::Other => {
            console.emit(
                Tone::Warning,
                "pull --rebase failed. This may point to a connection or permission problem.",
            )?;
            if confirm(
                console,
                "Do you still want to attempt the commit and push? \
                 (Risk of conflicts if remote changes exist)",
            )? {
                return Ok(());
            }
            console.emit(Tone::Failure, "pull --rebase failed and push cancelled. Aborting.")?;
            Err(Halt::Fatal)
        }
    }
}

fn commit<R: CommandRunner>(git: &Git<R>, console: &mut dyn Console) -> Result<(), Halt> {
    console.banner("Creating the commit")?;
    let mut message = ask(console, "Enter your commit message (e.g. 'feat: Add feature X'): ")?;
    if message.is_empty() {
        message = DEFAULT_COMMIT_MESSAGE.to_string();
        console.say(&format!("Using default commit message: '{message}'"))?;
    }

    let result = git.run_and_print(console, &["commit", "-m", &message], None, false)?;
    if result.success {
        console.emit(Tone::Success, "Commit created successfully.")?;
        return Ok(());
    }

    // Exits 1 even when there was simply nothing to commit.
    match classify_commit(&result) {
        CommitFailure::NothingToCommit => {
            console.say("No changes to commit. The working directory is clean.")?;
        }
        CommitFailure::Other => {
            console.emit(
                Tone::Failure,
                "Commit failed. Please check the error messages above.",
            )?;
        }
    }
    Err(Halt::Fatal)
}

fn push<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
) -> Result<PublishOutcome, Halt> {
    console.banner("Pushing to the remote")?;
    // The rebase may have moved HEAD.
    let branch = current_branch(git, console)?;

    let result = git.run_and_print(console, &["push", REMOTE, &branch], None, false)?;
    if result.success {
        console.emit(
            Tone::Success,
            "\nPush succeeded! All changes are on the remote.",
        )?;
        return published(git, console, branch);
    }

    let failure = classify_push(&result.stderr);
    tracing::info!(?failure, %branch, "push failed");
    match failure {
        PushFailure::NoUpstream => return push_with_upstream(git, console, branch),
        PushFailure::Authentication => {
            console.emit(Tone::Failure, "\nPush failed: authentication error.")?;
            console.say("GitHub removed support for password authentication for Git operations.")?;
            console.say(
                "Please check your credentials (personal access token - PAT, or SSH key).",
            )?;
            console.say(&format!("To create a PAT: {PAT_DOCS}"))?;
        }
        PushFailure::Rejected => {
            console.emit(
                Tone::Failure,
                "\nPush failed: push declined or protected branch restrictions.",
            )?;
            console.say(&format!(
                "You may not have permission to push directly to '{branch}'."
            ))?;
            console.say("Consider opening a Pull Request or pushing to a different branch.")?;
        }
        PushFailure::NonFastForward => {
            console.emit(
                Tone::Failure,
                "\nPush failed: the remote has changes you do not have.",
            )?;
            console.say("The remote repository was updated since your last pull.")?;
            console.say(
                "Please run `git pull --rebase` again to sync your changes, then rerun this command.",
            )?;
        }
        PushFailure::Unexpected => {
            console.emit(Tone::Failure, "\nPush failed: an unexpected error occurred.")?;
            console.say("Error details:")?;
            console.say(&result.stderr)?;
        }
    }
    Ok(PublishOutcome::PushNotCompleted { branch, failure })
}

fn push_with_upstream<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    branch: String,
) -> Result<PublishOutcome, Halt> {
    console.say(&format!(
        "The remote branch '{branch}' does not exist or is not set up for tracking."
    ))?;
    let question = format!(
        "Set the upstream branch and push (`git push --set-upstream {REMOTE} {branch}`)?"
    );
    if !confirm(console, &question)? {
        console.say("Upstream setup cancelled. The push was not performed.")?;
        return Ok(not_completed(branch));
    }

    let result = git.run_and_print(
        console,
        &["push", "--set-upstream", REMOTE, &branch],
        None,
        false,
    )?;
    if result.success {
        console.emit(
            Tone::Success,
            "\nSuccess! The remote branch was created and is now tracked.",
        )?;
        return published(git, console, branch);
    }
    console.emit(
        Tone::Failure,
        "\nThe push failed again. Please check your repository permissions.",
    )?;
    Ok(not_completed(branch))
}

fn not_completed(branch: String) -> PublishOutcome {
    PublishOutcome::PushNotCompleted {
        branch,
        failure: PushFailure::NoUpstream,
    }
}

fn published<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    branch: String,
) -> Result<PublishOutcome, Halt> {
    let remote_url = remote::current_url(git, console)?;
    let url = remote::web_url(&remote_url, &branch);
    console.say(&format!("You can view your repository here: {url}"))?;
    tracing::info!(%branch, %url, "published");
    Ok(PublishOutcome::Published { branch, url })
}
