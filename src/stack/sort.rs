//! Ancestry ordering of diverged branches
//!
//! Branches are compared through their merge bases with the target rather
//! than through their own tips: two sibling tips may share no ancestry, but
//! their merge bases with the target all lie on the target's history.

use super::pool::run_bounded;
use crate::error::{OracleError, Result};
use crate::oracle::VcsOracle;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Order `refs` so that more-ancestral merge bases come first
///
/// Each ref is keyed by its merge base with `target`, computed on a pool of
/// `concurrency` workers. The keys are then sorted with
/// [`AncestryComparator`]. Refs must be distinct. The result is ascending
/// (trunk-adjacent first); callers reverse it for display.
pub async fn order_by_ancestry(
    oracle: Arc<dyn VcsOracle>,
    target: &str,
    refs: &[String],
    concurrency: usize,
) -> Result<Vec<String>> {
    let keys = merge_bases_with_target(Arc::clone(&oracle), target, refs, concurrency).await?;
    let mut comparator = AncestryComparator::new(oracle.as_ref(), &keys);
    let sorted = merge_sort(refs.to_vec(), &mut comparator).await;
    debug!(
        queries = comparator.queries(),
        refs = refs.len(),
        "sorted by ancestry"
    );
    comparator.finish()?;
    Ok(sorted)
}

async fn merge_bases_with_target(
    oracle: Arc<dyn VcsOracle>,
    target: &str,
    refs: &[String],
    concurrency: usize,
) -> Result<HashMap<String, String>> {
    let target: Arc<str> = Arc::from(target);
    let keys = run_bounded(refs.to_vec(), concurrency, move |r| {
        let oracle = Arc::clone(&oracle);
        let target = Arc::clone(&target);
        async move { oracle.merge_base(&target, &r).await.map(Some) }
    })
    .await?;
    Ok(keys.into_iter().collect())
}

/// Two-outcome comparator over the ancestry of merge-base keys
///
/// `compare(a, b)` is `Less` when `a`'s key is an ancestor of `b`'s key and
/// `Greater` otherwise, so incomparable keys are forced into an order.
/// Identical refs or identical keys are `Equal` without a query. After the
/// first oracle failure every comparison is `Equal` and issues no query; the
/// failure is reported by [`AncestryComparator::finish`].
pub struct AncestryComparator<'a> {
    oracle: &'a dyn VcsOracle,
    keys: &'a HashMap<String, String>,
    failure: Option<OracleError>,
    queries: usize,
}

impl<'a> AncestryComparator<'a> {
    /// Create a comparator over `keys` (ref → merge base with target)
    pub fn new(oracle: &'a dyn VcsOracle, keys: &'a HashMap<String, String>) -> Self {
        Self {
            oracle,
            keys,
            failure: None,
            queries: 0,
        }
    }

    /// Compare two refs by the ancestry of their keys
    pub async fn compare(&mut self, a: &str, b: &str) -> Ordering {
        if self.failure.is_some() || a == b {
            return Ordering::Equal;
        }
        let key_a = self.keys.get(a).map_or(a, String::as_str);
        let key_b = self.keys.get(b).map_or(b, String::as_str);
        if key_a == key_b {
            return Ordering::Equal;
        }
        self.queries += 1;
        match self.oracle.is_ancestor(key_a, key_b).await {
            Ok(true) => Ordering::Less,
            Ok(false) => Ordering::Greater,
            Err(e) => {
                self.failure = Some(e);
                Ordering::Equal
            }
        }
    }

    /// Number of oracle queries issued so far
    pub const fn queries(&self) -> usize {
        self.queries
    }

    /// Whether a comparison has failed
    pub const fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Consume the comparator, surfacing the first failure if any
    pub fn finish(self) -> std::result::Result<(), OracleError> {
        self.failure.map_or(Ok(()), Err)
    }
}

/// Stable bottom-up merge sort driven by the async comparator
///
/// An element from the right run is taken only when it compares strictly
/// `Less` than the left one, so refs with incomparable keys keep their
/// input order.
async fn merge_sort(items: Vec<String>, comparator: &mut AncestryComparator<'_>) -> Vec<String> {
    let len = items.len();
    let mut current = items;
    let mut width = 1;
    while width < len {
        let mut next = Vec::with_capacity(len);
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if comparator.compare(&current[j], &current[i]).await == Ordering::Less {
                    next.push(current[j].clone());
                    j += 1;
                } else {
                    next.push(current[i].clone());
                    i += 1;
                }
            }
            next.extend_from_slice(&current[i..mid]);
            next.extend_from_slice(&current[j..end]);
            start = end;
        }
        current = next;
        width *= 2;
    }
    current
}
