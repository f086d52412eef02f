//! Version-control oracle
//!
//! Point queries (ancestor-of, merge-base-of) that the stack engine issues
//! against the repository. The engine never walks history itself.

mod git;

pub use git::GitOracle;

use crate::error::OracleError;
use crate::types::Commit;
use async_trait::async_trait;

/// Query interface over a repository's history
///
/// This trait lets the resolver and sorter run against `git` in production
/// and against an in-memory graph in tests.
#[async_trait]
pub trait VcsOracle: Send + Sync {
    /// Recently committed branch names, most recent first
    async fn recent_branch_heads(&self) -> Result<Vec<String>, OracleError>;

    /// Name of the checked-out branch
    ///
    /// Fails when HEAD is not on a named branch.
    async fn current_branch(&self) -> Result<String, OracleError>;

    /// Whether `ancestor` is a (non-strict) ancestor of `descendant`
    ///
    /// A definite "no" is `Ok(false)`, never an error.
    async fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, OracleError>;

    /// Best common ancestor commit of `a` and `b`
    async fn merge_base(&self, a: &str, b: &str) -> Result<String, OracleError>;

    /// Commits on `branch` that are not on trunk, newest first
    async fn logs(&self, branch: &str) -> Result<Vec<Commit>, OracleError>;
}
