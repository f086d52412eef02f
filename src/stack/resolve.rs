//! Merge-base resolution
//!
//! Splits candidate branches into those already merged into trunk and those
//! that have diverged, recording each diverged branch's divergence point.

use super::pool::run_bounded;
use crate::error::{OracleError, Result};
use crate::oracle::VcsOracle;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Resolve the divergence point of every candidate against `target`
///
/// A candidate whose merge base with `target` is an ancestor of `trunk` is
/// fully merged and left out of the result. Every other candidate maps to that
/// merge base. Queries run on a pool of `concurrency` workers; the first
/// failing query aborts the whole resolution.
pub async fn resolve_merge_bases(
    oracle: Arc<dyn VcsOracle>,
    target: &str,
    candidates: &[String],
    trunk: &str,
    concurrency: usize,
) -> Result<HashMap<String, String>> {
    let target: Arc<str> = Arc::from(target);
    let trunk: Arc<str> = Arc::from(trunk);

    let resolved = run_bounded(candidates.to_vec(), concurrency, move |candidate| {
        let oracle = Arc::clone(&oracle);
        let target = Arc::clone(&target);
        let trunk = Arc::clone(&trunk);
        async move { divergence_point(oracle.as_ref(), &target, &candidate, &trunk).await }
    })
    .await?;

    info!(
        candidates = candidates.len(),
        diverged = resolved.len(),
        "resolved merge bases"
    );
    Ok(resolved.into_iter().collect())
}

/// Merge base of `candidate` and `target`, or `None` if it already sits on trunk
async fn divergence_point(
    oracle: &dyn VcsOracle,
    target: &str,
    candidate: &str,
    trunk: &str,
) -> std::result::Result<Option<String>, OracleError> {
    let point = oracle.merge_base(target, candidate).await?;
    if oracle.is_ancestor(&point, trunk).await? {
        debug!(%candidate, %point, "merged into trunk, skipping");
        return Ok(None);
    }
    debug!(%candidate, %point, "diverged from trunk");
    Ok(Some(point))
}
