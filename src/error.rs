//! Error types for git-stacked

use thiserror::Error;

/// The version-control query that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleOperation {
    /// Listing recently committed branch heads
    RecentBranchHeads,
    /// Reading the checked-out branch
    CurrentBranch,
    /// Testing whether one ref is an ancestor of another
    IsAncestor,
    /// Computing the merge base of two refs
    MergeBase,
    /// Reading the commit log of a ref
    Logs,
}

impl std::fmt::Display for OracleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecentBranchHeads => write!(f, "recent branch heads"),
            Self::CurrentBranch => write!(f, "current branch"),
            Self::IsAncestor => write!(f, "is-ancestor"),
            Self::MergeBase => write!(f, "merge-base"),
            Self::Logs => write!(f, "logs"),
        }
    }
}

/// A failed query against the version-control oracle
///
/// A negative ancestry answer is never an `OracleError`; this only covers
/// infrastructure failures and unexpected output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} query failed{}: {detail}", format_refs(.refs))]
pub struct OracleError {
    /// Which query failed
    pub operation: OracleOperation,
    /// Refs the query was issued for
    pub refs: Vec<String>,
    /// Underlying failure (stderr, spawn error, or unexpected output)
    pub detail: String,
}

impl OracleError {
    /// Create an error for `operation` over `refs`
    pub fn new<I, S>(operation: OracleOperation, refs: I, detail: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operation,
            refs: refs.into_iter().map(Into::into).collect(),
            detail: detail.into(),
        }
    }
}

fn format_refs(refs: &[String]) -> String {
    if refs.is_empty() {
        String::new()
    } else {
        format!(" for {}", refs.join(", "))
    }
}

/// Errors that can occur while discovering a stack
#[derive(Debug, Error)]
pub enum Error {
    /// A version-control query failed
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A worker task panicked or was cancelled
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
