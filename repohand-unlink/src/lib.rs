//! # repohand-unlink
//!
//! Detach a working directory from version control: drop the `origin`
//! remote, then delete `.git` and all history with it. Working files are not
//! touched. Nothing happens unless the user types [`CONFIRMATION_PHRASE`]
//! exactly.

use std::fs;
use std::path::{Path, PathBuf};

use repohand_core::{repo, CommandRunner, Console, Git, Halt, Tone, CANCELLED_BY_USER};

/// The exact text the user must type. Surrounding whitespace is ignored;
/// case and inner spacing are not.
pub const CONFIRMATION_PHRASE: &str = "yes, remove git";

const RULE_WIDTH: usize = 60;

/// How a run that did not halt ended. All of these exit with status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    /// No `.git` directory; nothing was done.
    NotManaged,
    /// The phrase did not match; nothing was done.
    Cancelled,
    /// `.git` was deleted. `remote_removed` is false when `origin` was
    /// already gone.
    Unlinked {
        metadata_dir: PathBuf,
        remote_removed: bool,
    },
}

/// True iff `input`, trimmed, is exactly [`CONFIRMATION_PHRASE`].
pub fn is_confirmed(input: &str) -> bool {
    input.trim() == CONFIRMATION_PHRASE
}

/// Run the unlink flow in `workdir`.
pub fn run<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
    workdir: &Path,
) -> Result<UnlinkOutcome, Halt> {
    let metadata_dir = repo::metadata_dir(workdir);

    console.emit(Tone::Banner, "--- Git version control removal ---")?;
    console.say(&format!("Current working directory: {}", workdir.display()))?;

    if !metadata_dir.is_dir() {
        console.say("\nInfo: no Git repository (`.git`) was found here.")?;
        console.say("The project is not under version control. Nothing to do.")?;
        return Ok(UnlinkOutcome::NotManaged);
    }

    warn(console)?;

    let prompt = format!(
        "\nTo confirm, type the following phrase exactly: '{CONFIRMATION_PHRASE}'\n> "
    );
    let Some(input) = console.read_line(&prompt)? else {
        console.say(CANCELLED_BY_USER)?;
        return Err(Halt::Interrupted);
    };
    if !is_confirmed(&input) {
        console.emit(
            Tone::Warning,
            "\nIncorrect confirmation. Operation cancelled. No changes were made.",
        )?;
        return Ok(UnlinkOutcome::Cancelled);
    }

    console.say("\nConfirmation received. Starting the procedure...")?;
    let remote_removed = remove_remote(git, console)?;
    delete_metadata(console, &metadata_dir)?;

    let rule = "-".repeat(RULE_WIDTH);
    console.emit(
        Tone::Success,
        &format!(
            "\n{rule}\nOperation complete.\nThis project is no longer under Git version control.\n{rule}"
        ),
    )?;
    tracing::info!(path = %metadata_dir.display(), remote_removed, "unlinked");
    Ok(UnlinkOutcome::Unlinked {
        metadata_dir,
        remote_removed,
    })
}

fn warn(console: &mut dyn Console) -> Result<(), Halt> {
    let rule = "=".repeat(RULE_WIDTH);
    console.emit(Tone::Warning, &format!("\n{rule}"))?;
    console.emit(Tone::Failure, "WARNING: DESTRUCTIVE AND IRREVERSIBLE ACTION")?;
    console.emit(Tone::Warning, &rule)?;
    console.say("You are about to:")?;
    console.say("  1. Remove this project's link to its remote repository.")?;
    console.say("  2. PERMANENTLY delete the whole version history (the commits).")?;
    console.say("\nYour current code files will NOT be touched, but the history will be lost.")?;
    console.emit(Tone::Warning, &rule)?;
    Ok(())
}

/// Step 1: `remote remove origin`. Failure is informational only.
fn remove_remote<R: CommandRunner>(git: &Git<R>, console: &mut dyn Console) -> Result<bool, Halt> {
    console.say(&format!(
        "\nStep 1/2: Removing the link to the remote repository ('{}')...",
        repo::REMOTE
    ))?;

    let result = git.probe(&["remote", "remove", repo::REMOTE]);
    if !result.launched {
        console.emit_err(&format!(
            "Error: the '{}' command could not be found. Make sure Git is installed.",
            git.program()
        ))?;
    }
    if result.success {
        console.say(" -> Remote link 'origin' removed successfully.")?;
    } else {
        tracing::debug!(stderr = %result.stderr, "remote remove failed");
        console.say(" -> Remote link 'origin' not found or already removed.")?;
    }
    Ok(result.success)
}

/// Step 2: delete the metadata directory tree.
fn delete_metadata(console: &mut dyn Console, metadata_dir: &Path) -> Result<(), Halt> {
    console.say(&format!(
        "\nStep 2/2: Deleting the local version control directory ({})...",
        repo::METADATA_DIR
    ))?;

    if let Err(err) = fs::remove_dir_all(metadata_dir) {
        tracing::debug!(path = %metadata_dir.display(), error = %err, "metadata removal failed");
        console.emit_err(&format!(
            "\nCRITICAL ERROR: Unable to delete the '{}' directory.\nError: {err}",
            repo::METADATA_DIR
        ))?;
        return Err(Halt::Fatal);
    }
    console.emit(
        Tone::Success,
        &format!(" -> The '{}' directory was deleted successfully.", repo::METADATA_DIR),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("yes, remove git", true)]
    #[case("  yes, remove git \t", true)]
    #[case("Yes, remove git", false)]
    #[case("yes, remove git.", false)]
    #[case("yes,  remove git", false)]
    #[case("yes remove git", false)]
    #[case("y", false)]
    #[case("", false)]
    fn confirmation_requires_the_exact_phrase(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_confirmed(input), expected);
    }
}
