//! Shared plumbing for the `git-publish` and `git-unlink` binaries.

use std::fmt::Debug;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args};

use repohand_core::{git::DEFAULT_PROGRAM, Halt, CANCELLED_BY_USER};

/// Flags accepted by both binaries.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Version-control executable to invoke.
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PROGRAM)]
    pub git: String,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Logging, color, and interrupt handling for the rest of the run.
    pub fn install(&self) -> Result<()> {
        init_tracing(self.verbose);
        if self.no_color {
            colored::control::set_override(false);
        }
        install_interrupt_handler()
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Ctrl-C anywhere in the run prints the cancellation notice and exits 1.
fn install_interrupt_handler() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the signal runtime")?;

    std::thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("received ctrl-c");
                        println!("{CANCELLED_BY_USER}");
                        std::process::exit(1);
                    }
                    Err(err) => tracing::warn!(error = %err, "cannot listen for ctrl-c"),
                }
            });
        })
        .context("failed to spawn the interrupt thread")?;
    Ok(())
}

/// Map an orchestrator result onto the process exit status.
pub fn finish<T: Debug>(result: Result<T, Halt>) -> ExitCode {
    ExitCode::from(exit_status(&result))
}

fn exit_status<T: Debug>(result: &Result<T, Halt>) -> u8 {
    match result {
        Ok(outcome) => {
            tracing::debug!(?outcome, "finished");
            0
        }
        Err(halt) => {
            if let Halt::Console(err) = halt {
                eprintln!("error: {err}");
            }
            tracing::debug!(%halt, "halted");
            halt.exit_code()
        }
    }
}
