//! Show command - print the current stack

use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use git_stacked::error::{Error, Result};
use git_stacked::oracle::{GitOracle, VcsOracle};
use git_stacked::stack::{DiscoverOptions, discover_stack};
use git_stacked::{Stack, StackConfig};
use indicatif::ProgressBar;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Options for the show command
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Discover the stack for this branch instead of the checked-out one
    pub target: Option<String>,
    /// Print each branch's commits under its name
    pub logs: bool,
    /// Print the stack as JSON
    pub json: bool,
}

/// Run the show command
pub async fn run_show(path: &Path, config: &StackConfig, options: ShowOptions) -> Result<()> {
    let oracle: Arc<dyn VcsOracle> =
        Arc::new(GitOracle::new(path, config.trunk.clone(), config.recent_limit));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Resolving branches against {}...", config.trunk.accent()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let discover = DiscoverOptions {
        target: options.target,
        with_logs: options.logs,
    };
    let result = discover_stack(oracle, config, &discover).await;
    spinner.finish_and_clear();
    let stack = result?;

    if options.json {
        let json = serde_json::to_string_pretty(&stack)
            .map_err(|e| Error::Internal(format!("failed to serialize stack: {e}")))?;
        println!("{json}");
    } else {
        print_stack(&stack, options.logs);
    }

    Ok(())
}

fn print_stack(stack: &Stack, with_logs: bool) {
    for branch in &stack.branches {
        if !with_logs {
            println!("{}", branch.name);
            continue;
        }
        println!("{}", branch.name.emphasis());
        for commit in &branch.commits {
            println!("  {} {}", commit.short_hash().muted(), commit.message);
        }
    }
}
