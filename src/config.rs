//! Stack discovery configuration
//!
//! The trunk name is resolved once at startup and passed by value into the
//! oracle and the discovery functions.

use crate::error::{Error, Result};

/// Trunk ref used when nothing overrides it
pub const DEFAULT_TRUNK: &str = "origin/main";

/// Environment variable that overrides the trunk ref
pub const TRUNK_ENV_VAR: &str = "GIT_MAIN";

/// Number of concurrent merge-base workers
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Maximum number of recently committed branches considered
pub const RECENT_HEADS_LIMIT: usize = 50;

/// Configuration for stack discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// Trunk ref that stacked branches diverge from
    pub trunk: String,
    /// Size of the worker pool issuing oracle queries
    pub concurrency: usize,
    /// Cap on candidate branches taken from recent heads
    pub recent_limit: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            trunk: DEFAULT_TRUNK.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            recent_limit: RECENT_HEADS_LIMIT,
        }
    }
}

impl StackConfig {
    /// Load configuration from the process environment
    ///
    /// An explicit `trunk` wins over `GIT_MAIN`, which is then never read.
    pub fn from_env(trunk: Option<String>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), trunk)
    }

    /// Load configuration using `lookup` to read variables
    pub fn from_lookup<F>(lookup: F, trunk: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::default();
        match trunk.or_else(|| lookup(TRUNK_ENV_VAR)) {
            Some(trunk) => config.with_trunk(trunk),
            None => Ok(config),
        }
    }

    /// Override the trunk ref
    pub fn with_trunk(mut self, trunk: impl Into<String>) -> Result<Self> {
        let trunk = trunk.into();
        let trimmed = trunk.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("trunk ref must not be empty".to_string()));
        }
        self.trunk = trimmed.to_string();
        Ok(self)
    }
}
