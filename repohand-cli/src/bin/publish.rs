//! git-publish — stage, sync, commit, and push to `origin`.
//!
//! # Usage
//!
//! ```text
//! git-publish [--git <PROGRAM>] [--no-color] [-v...]
//! ```
//!
//! Run from the root of a repository. Prompts for the remote URL when
//! needed and for the commit message.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use repohand_cli::{finish, CommonArgs};
use repohand_core::{Git, ProcessRunner, TermConsole};

#[derive(Parser, Debug)]
#[command(
    name = "git-publish",
    version,
    about = "Stage, rebase onto origin, commit, and push the current branch",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    cli.common.install()?;
    let workdir = std::env::current_dir().context("could not determine the current directory")?;

    let git = Git::with_program(ProcessRunner::in_dir(&workdir), cli.common.git);
    let mut console = TermConsole::stdio();
    Ok(finish(repohand_publish::run(&git, &mut console, &workdir)))
}
