//! `Git` printing conveniences over a scripted runner.

use repohand_core::{
    testing::{ScriptedConsole, ScriptedRunner},
    CommandResult, Git, Halt, Tone,
};

fn git(runner: ScriptedRunner) -> Git<ScriptedRunner> {
    Git::new(runner)
}

// ---------------------------------------------------------------------------
// run_and_print
// ---------------------------------------------------------------------------

#[test]
fn run_and_print_shows_banner_then_output() {
    let git = git(ScriptedRunner::new().on("add .", CommandResult::ok("staged")));
    let mut console = ScriptedConsole::default();

    let result = git
        .run_and_print(&mut console, &["add", "."], Some("Staging"), true)
        .expect("ok");

    assert!(result.success);
    assert_eq!(
        console.out,
        vec![
            (Tone::Banner, "\n--- Staging ---".to_string()),
            (Tone::Plain, "staged".to_string()),
        ]
    );
}

#[test]
fn run_and_print_without_message_prints_no_banner() {
    let git = git(ScriptedRunner::new().on("add .", CommandResult::ok("")));
    let mut console = ScriptedConsole::default();

    git.run_and_print(&mut console, &["add", "."], None, false)
        .expect("ok");

    assert!(console.out.is_empty(), "got: {:?}", console.out);
}

#[test]
fn run_and_print_prints_both_streams_and_failure_line() {
    let git = git(ScriptedRunner::new().on(
        "push origin main",
        CommandResult::failed("partial", "rejected"),
    ));
    let mut console = ScriptedConsole::default();

    let result = git
        .run_and_print(&mut console, &["push", "origin", "main"], None, false)
        .expect("non-fatal");

    assert!(!result.success);
    assert_eq!(result.stderr, "rejected");
    let out = console.stdout();
    assert_eq!(
        out,
        "partial\nrejected\nCommand failed: git push origin main"
    );
}

#[test]
fn run_and_print_fatal_failure_halts() {
    let git = git(ScriptedRunner::new().on("add .", CommandResult::failed("", "boom")));
    let mut console = ScriptedConsole::default();

    let err = git
        .run_and_print(&mut console, &["add", "."], None, true)
        .unwrap_err();

    assert!(matches!(err, Halt::Fatal));
    assert!(console.stdout().contains("Command failed: git add ."));
}

// ---------------------------------------------------------------------------
// output
// ---------------------------------------------------------------------------

#[test]
fn output_returns_stdout_silently() {
    let git = git(
        ScriptedRunner::new().on("rev-parse --abbrev-ref HEAD", CommandResult::ok("main")),
    );
    let mut console = ScriptedConsole::default();

    let branch = git
        .output(&mut console, &["rev-parse", "--abbrev-ref", "HEAD"], true)
        .expect("ok");

    assert_eq!(branch, "main");
    assert!(console.out.is_empty());
}

#[test]
fn non_fatal_output_failure_returns_empty_string() {
    let git = git(ScriptedRunner::new().on(
        "config --get remote.origin.url",
        CommandResult::failed("", ""),
    ));
    let mut console = ScriptedConsole::default();

    let url = git
        .output(&mut console, &["config", "--get", "remote.origin.url"], false)
        .expect("non-fatal");

    assert_eq!(url, "");
    assert_eq!(
        console.stdout(),
        "Error while running: git config --get remote.origin.url"
    );
}

#[test]
fn fatal_output_failure_prints_details_and_halts() {
    let git = git(ScriptedRunner::new().on(
        "rev-parse --abbrev-ref HEAD",
        CommandResult::failed("", "fatal: not a git repository"),
    ));
    let mut console = ScriptedConsole::default();

    let err = git
        .output(&mut console, &["rev-parse", "--abbrev-ref", "HEAD"], true)
        .unwrap_err();

    assert!(matches!(err, Halt::Fatal));
    assert!(console
        .stdout()
        .contains("Details: fatal: not a git repository"));
}

#[test]
fn custom_program_is_used_in_argv_and_messages() {
    let git = Git::with_program(
        ScriptedRunner::new().on("--version", CommandResult::failed("", "")),
        "/opt/bin/git",
    );
    let mut console = ScriptedConsole::default();

    git.run_and_print(&mut console, &["--version"], None, false)
        .expect("non-fatal");

    assert_eq!(git.program(), "/opt/bin/git");
    assert_eq!(git.runner().calls(), vec!["--version".to_string()]);
    assert!(console.stdout().contains("Command failed: /opt/bin/git --version"));
}
