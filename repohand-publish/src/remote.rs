//! The `origin` remote: confirming, replacing, or adding its URL, and the
//! browsable URL shown after a push.

use repohand_core::repo::REMOTE;
use repohand_core::{ask, confirm, CommandRunner, Console, Git, Halt, Tone};

/// `git config` key holding the remote URL.
pub const URL_KEY: &str = "remote.origin.url";

/// Suffix removed from the remote URL to build the web URL.
const CLONE_SUFFIX: &str = ".git";

/// How the remote configuration stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSetup {
    /// The existing URL was confirmed.
    Kept(String),
    /// The user replaced the existing URL.
    Updated(String),
    /// No remote existed; one was added.
    Added(String),
    /// Empty input or a failed `git remote` write. The caller aborts.
    Failed,
}

impl RemoteSetup {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Kept(url) | Self::Updated(url) | Self::Added(url) => Some(url),
            Self::Failed => None,
        }
    }
}

/// Current `remote.origin.url`, or an empty string when unset.
pub fn current_url<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
) -> Result<String, Halt> {
    git.output(console, &["config", "--get", URL_KEY], false)
}

/// Interactive remote configuration.
pub fn configure<R: CommandRunner>(
    git: &Git<R>,
    console: &mut dyn Console,
) -> Result<RemoteSetup, Halt> {
    console.banner(&format!("Configuring the remote '{REMOTE}'"))?;

    let existing = current_url(git, console)?;
    if existing.is_empty() {
        return add(git, console);
    }

    console.say(&format!("The remote '{REMOTE}' is configured with URL: {existing}"))?;
    if confirm(console, "Is this the correct URL for your repository?")? {
        return Ok(RemoteSetup::Kept(existing));
    }

    let url = ask(console, "Please enter the correct URL of your repository: ")?;
    if url.is_empty() {
        console.emit(Tone::Warning, "Empty URL. Cancelling the remote update.")?;
        return Ok(RemoteSetup::Failed);
    }

    let result = git.run_and_print(
        console,
        &["remote", "set-url", REMOTE, &url],
        Some(&format!("Updating the URL of '{REMOTE}' to {url}")),
        false,
    )?;
    if !result.success {
        console.emit(Tone::Failure, "Failed to update the remote URL.")?;
        return Ok(RemoteSetup::Failed);
    }
    console.emit(Tone::Success, "Remote URL updated successfully.")?;
    tracing::info!(%url, "remote url updated");
    Ok(RemoteSetup::Updated(url))
}

fn add<R: CommandRunner>(git: &Git<R>, console: &mut dyn Console) -> Result<RemoteSetup, Halt> {
    console.say(&format!("The remote '{REMOTE}' is not configured."))?;
    let url = ask(
        console,
        "Please enter the URL of your repository (e.g. https://github.com/user/repo.git): ",
    )?;
    if url.is_empty() {
        console.emit(Tone::Warning, "Empty URL. Cancelling the remote addition.")?;
        return Ok(RemoteSetup::Failed);
    }

    let result = git.run_and_print(
        console,
        &["remote", "add", REMOTE, &url],
        Some(&format!("Adding the remote '{REMOTE}' with URL {url}")),
        false,
    )?;
    if !result.success {
        console.emit(Tone::Failure, "Failed to add the remote.")?;
        return Ok(RemoteSetup::Failed);
    }
    console.emit(Tone::Success, &format!("Remote '{REMOTE}' added successfully."))?;
    tracing::info!(%url, "remote added");
    Ok(RemoteSetup::Added(url))
}

/// Browsable location of `branch`: the remote URL without its `.git`
/// suffix, followed by `/tree/<branch>`.
pub fn web_url(remote_url: &str, branch: &str) -> String {
    let base = remote_url.strip_suffix(CLONE_SUFFIX).unwrap_or(remote_url);
    format!("{base}/tree/{branch}")
}
