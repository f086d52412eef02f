//! git-stacked: discover the stack of branches diverged from trunk
//!
//! Given the checked-out branch, finds the recently committed branches whose
//! history separates from trunk and orders them from the branch closest to
//! the working tip down to the branch closest to trunk.
//!
//! All history questions go through the [`oracle::VcsOracle`] trait, so the
//! engine in [`stack`] can run against `git` or against an in-memory graph.

pub mod config;
pub mod error;
pub mod oracle;
pub mod stack;
pub mod types;

pub use config::StackConfig;
pub use error::{Error, OracleError, OracleOperation, Result};
pub use oracle::{GitOracle, VcsOracle};
pub use stack::{DiscoverOptions, discover_stack, order_by_ancestry, resolve_merge_bases};
pub use types::{Commit, Stack, StackBranch};
