//! Core types for git-stacked

use serde::{Deserialize, Serialize};

/// A commit entry from a branch's log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Commit subject line
    pub message: String,
}

impl Commit {
    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        self.hash.get(..12).unwrap_or(&self.hash)
    }
}

/// One branch in a discovered stack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackBranch {
    /// Branch name
    pub name: String,
    /// Merge base of this branch and the target branch
    pub divergence_point: String,
    /// Commits in `trunk..name`, newest first (empty unless logs were requested)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,
}

/// Branches stacked between trunk and the target branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stack {
    /// Branch the stack was discovered from (normally the checked-out branch)
    pub target: String,
    /// Trunk ref the stack diverged from
    pub trunk: String,
    /// Branches ordered closest-to-target first, trunk-adjacent last
    pub branches: Vec<StackBranch>,
}

impl Stack {
    /// Branch names in display order
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }

    /// Whether no branch has diverged from trunk
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
