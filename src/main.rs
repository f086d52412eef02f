//! git-stacked - show the stack of branches between trunk and the current branch

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::style::Stylize;
use cli::{ShowOptions, run_show};
use git_stacked::StackConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Show the stack of branches diverged from trunk, closest to the current branch first
#[derive(Parser)]
#[command(name = "git-stacked", version, about)]
struct Cli {
    /// Path to the git repository
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Trunk ref the stack diverges from (overrides GIT_MAIN, default origin/main)
    #[arg(long)]
    trunk: Option<String>,

    /// Branch to discover the stack for (default: checked-out branch)
    #[arg(long)]
    target: Option<String>,

    /// Print each branch's commits that are not on trunk
    #[arg(long)]
    logs: bool,

    /// Print the stack as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StackConfig::from_env(cli.trunk).context("could not load configuration")?;

    let options = ShowOptions {
        target: cli.target,
        logs: cli.logs,
        json: cli.json,
    };
    run_show(&cli.path, &config, options)
        .await
        .context("error building stack")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "error:".error());
            ExitCode::FAILURE
        }
    }
}
