//! Stack discovery engine
//!
//! Three phases:
//! 1. Resolve - find the divergence point of every recent branch (concurrent)
//! 2. Order - sort diverged branches by ancestry of their divergence points
//! 3. Describe - optionally attach each branch's commits

mod pool;
mod resolve;
mod sort;

pub use resolve::resolve_merge_bases;
pub use sort::{AncestryComparator, order_by_ancestry};

use crate::config::StackConfig;
use crate::error::{Error, Result};
use crate::oracle::VcsOracle;
use crate::types::{Stack, StackBranch};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Options for stack discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Branch to discover the stack for (defaults to the checked-out branch)
    pub target: Option<String>,
    /// Fetch the commits of each branch
    pub with_logs: bool,
}

/// Discover the stack of branches between trunk and the target branch
///
/// Candidates are the recently committed branch heads. Branches are returned
/// closest-to-target first, trunk-adjacent last.
pub async fn discover_stack(
    oracle: Arc<dyn VcsOracle>,
    config: &StackConfig,
    options: &DiscoverOptions,
) -> Result<Stack> {
    let target = match &options.target {
        Some(target) => target.clone(),
        None => oracle.current_branch().await?,
    };
    let candidates = oracle.recent_branch_heads().await?;
    info!(%target, trunk = %config.trunk, candidates = candidates.len(), "discovering stack");

    let points = resolve_merge_bases(
        Arc::clone(&oracle),
        &target,
        &candidates,
        &config.trunk,
        config.concurrency,
    )
    .await?;

    // Keep recent-heads order so the sort input is deterministic
    let diverged: Vec<String> = candidates
        .into_iter()
        .filter(|c| points.contains_key(c))
        .collect();

    let mut ordered =
        order_by_ancestry(Arc::clone(&oracle), &target, &diverged, config.concurrency).await?;
    ordered.reverse();

    let mut branches = Vec::with_capacity(ordered.len());
    for name in ordered {
        let commits = if options.with_logs {
            oracle.logs(&name).await?
        } else {
            Vec::new()
        };
        let divergence_point = divergence_point_of(&points, &name)?;
        branches.push(StackBranch {
            name,
            divergence_point,
            commits,
        });
    }

    Ok(Stack {
        target,
        trunk: config.trunk.clone(),
        branches,
    })
}

/// Look up a resolved divergence point; every ordered branch must have one
fn divergence_point_of(points: &HashMap<String, String>, name: &str) -> Result<String> {
    points
        .get(name)
        .cloned()
        .ok_or_else(|| Error::Internal(format!("ordered branch {name} has no divergence point")))
}
