//! Classification of failed `git` invocations.
//!
//! The wording of git's diagnostics is not a stable contract. Every message
//! fragment this crate reacts to lives in this module; stages only ever see
//! the enums.

use repohand_core::CommandResult;

/// Why `pull --rebase` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullFailure {
    /// The rebase stopped on conflicts; the user must resolve them.
    Conflict,
    /// Anything else: network, permissions, missing remote branch.
    Other,
}

/// Why `commit` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitFailure {
    NothingToCommit,
    Other,
}

/// Why `push` failed. Variants are listed in matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushFailure {
    /// The branch has no upstream; pushing with `--set-upstream` may fix it.
    NoUpstream,
    /// Credentials rejected, including removed password authentication.
    Authentication,
    /// Push declined by the server or a protected branch.
    Rejected,
    /// The remote has commits the local branch lacks.
    NonFastForward,
    Unexpected,
}

const PULL_CONFLICT: &str = "conflict";

const COMMIT_NOTHING: [&str; 2] = ["nothing to commit", "no changes added to commit"];

const PUSH_PATTERNS: [(PushFailure, &[&str]); 4] = [
    (PushFailure::NoUpstream, &["has no upstream branch"]),
    (
        PushFailure::Authentication,
        &[
            "authentication failed",
            "support for password authentication was removed",
        ],
    ),
    (PushFailure::Rejected, &["push declined", "protected branch"]),
    (PushFailure::NonFastForward, &["non-fast-forward"]),
];

/// Case-sensitive search of both streams.
pub fn classify_pull(result: &CommandResult) -> PullFailure {
    if result.mentions(PULL_CONFLICT) {
        PullFailure::Conflict
    } else {
        PullFailure::Other
    }
}

/// Searches both streams, ignoring case. git prints "nothing to commit" on
/// stdout.
pub fn classify_commit(result: &CommandResult) -> CommitFailure {
    let haystack = format!("{}\n{}", result.stdout, result.stderr).to_lowercase();
    if COMMIT_NOTHING.iter().any(|p| haystack.contains(p)) {
        CommitFailure::NothingToCommit
    } else {
        CommitFailure::Other
    }
}

/// First matching category wins. Matching ignores case
/// (`fatal: Authentication failed for ...`).
pub fn classify_push(stderr: &str) -> PushFailure {
    let haystack = stderr.to_lowercase();
    PUSH_PATTERNS
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| haystack.contains(n)))
        .map(|(kind, _)| *kind)
        .unwrap_or(PushFailure::Unexpected)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "",
        "error: could not apply 1a2b3c... fix\nResolve all conflicts manually",
        PullFailure::Conflict
    )]
    #[case(
        "Auto-merging a.txt\nCONFLICT (content): Merge conflict in a.txt",
        "",
        PullFailure::Conflict
    )]
    #[case("", "fatal: couldn't find remote ref main", PullFailure::Other)]
    #[case(
        "",
        "fatal: unable to access 'https://example.com/': Could not resolve host",
        PullFailure::Other
    )]
    fn pull_failures(#[case] stdout: &str, #[case] stderr: &str, #[case] expected: PullFailure) {
        assert_eq!(classify_pull(&CommandResult::failed(stdout, stderr)), expected);
    }

    #[test]
    fn pull_conflict_match_is_case_sensitive() {
        let result = CommandResult::failed("", "CONFLICT (modify/delete)");
        assert_eq!(classify_pull(&result), PullFailure::Other);
    }

    #[rstest]
    #[case(
        "On branch main\nnothing to commit, working tree clean",
        "",
        CommitFailure::NothingToCommit
    )]
    #[case("", "no changes added to commit (use \"git add\")", CommitFailure::NothingToCommit)]
    #[case("", "Author identity unknown", CommitFailure::Other)]
    fn commit_failures(
        #[case] stdout: &str,
        #[case] stderr: &str,
        #[case] expected: CommitFailure,
    ) {
        assert_eq!(classify_commit(&CommandResult::failed(stdout, stderr)), expected);
    }

    #[rstest]
    #[case("fatal: The current branch feat has no upstream branch.", PushFailure::NoUpstream)]
    #[case(
        "fatal: Authentication failed for 'https://example.com/u/r.git/'",
        PushFailure::Authentication
    )]
    #[case(
        "remote: Support for password authentication was removed on August 13, 2021.",
        PushFailure::Authentication
    )]
    #[case(
        "! [remote rejected] main -> main (push declined due to repository rule violations)",
        PushFailure::Rejected
    )]
    #[case(
        "remote: error: GH006: Protected branch update failed for refs/heads/main.",
        PushFailure::Rejected
    )]
    #[case("! [rejected] main -> main (non-fast-forward)", PushFailure::NonFastForward)]
    #[case("fatal: repository not found", PushFailure::Unexpected)]
    #[case("", PushFailure::Unexpected)]
    fn push_failures(#[case] stderr: &str, #[case] expected: PushFailure) {
        assert_eq!(classify_push(stderr), expected);
    }

    #[test]
    fn push_priority_prefers_earlier_category() {
        let stderr = "has no upstream branch\nauthentication failed\nnon-fast-forward";
        assert_eq!(classify_push(stderr), PushFailure::NoUpstream);

        let stderr = "protected branch (non-fast-forward)";
        assert_eq!(classify_push(stderr), PushFailure::Rejected);
    }
}
