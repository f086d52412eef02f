//! Oracle backed by the `git` executable

use super::VcsOracle;
use crate::error::{OracleError, OracleOperation};
use crate::types::Commit;
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Output;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::debug;

static REF_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^refs/heads/(.+)$").expect("valid regex"));

/// `git merge-base --is-ancestor` exits with 1 for a definite "no"
const NOT_ANCESTOR_EXIT_CODE: i32 = 1;

/// Oracle that shells out to `git -C <repo>` for every query
#[derive(Debug, Clone)]
pub struct GitOracle {
    repo_path: PathBuf,
    trunk: String,
    recent_limit: usize,
}

impl GitOracle {
    /// Create an oracle for the repository at `repo_path`
    ///
    /// `trunk` bounds the commit range returned by [`VcsOracle::logs`];
    /// `recent_limit` caps [`VcsOracle::recent_branch_heads`].
    pub fn new(repo_path: impl Into<PathBuf>, trunk: impl Into<String>, recent_limit: usize) -> Self {
        Self {
            repo_path: repo_path.into(),
            trunk: trunk.into(),
            recent_limit,
        }
    }

    async fn run(
        &self,
        operation: OracleOperation,
        refs: &[&str],
        args: &[&str],
    ) -> Result<Output, OracleError> {
        debug!(?operation, ?args, "running git");
        Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                OracleError::new(operation, refs.iter().copied(), format!("failed to run git: {e}"))
            })
    }

    /// Run git and require a zero exit status, returning trimmed stdout
    async fn run_checked(
        &self,
        operation: OracleOperation,
        refs: &[&str],
        args: &[&str],
    ) -> Result<String, OracleError> {
        let output = self.run(operation, refs, args).await?;
        if !output.status.success() {
            return Err(OracleError::new(
                operation,
                refs.iter().copied(),
                failure_detail(&output),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}

/// Strip `refs/heads/` from a full ref name
fn branch_name(full_ref: &str) -> Option<&str> {
    REF_HEAD_RE
        .captures(full_ref)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse `git for-each-ref` default output (`<oid> <type>\t<refname>`)
fn parse_for_each_ref(output: &str) -> Result<Vec<String>, String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let full_ref = line
                .split_once('\t')
                .map(|(_, name)| name)
                .ok_or_else(|| format!("unexpected for-each-ref line: \"{line}\""))?;
            branch_name(full_ref)
                .map(str::to_string)
                .ok_or_else(|| format!("unexpected ref name: \"{full_ref}\""))
        })
        .collect()
}

/// Parse `git log --pretty=format:%H%x09%s` output
fn parse_log(output: &str) -> Result<Vec<Commit>, String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split_once('\t')
                .map(|(hash, message)| Commit {
                    hash: hash.to_string(),
                    message: message.to_string(),
                })
                .ok_or_else(|| format!("unexpected log line: \"{line}\""))
        })
        .collect()
}

#[async_trait]
impl VcsOracle for GitOracle {
    async fn recent_branch_heads(&self) -> Result<Vec<String>, OracleError> {
        let count = format!("--count={}", self.recent_limit);
        let stdout = self
            .run_checked(
                OracleOperation::RecentBranchHeads,
                &[],
                &["for-each-ref", "--sort=-committerdate", count.as_str(), "refs/heads/"],
            )
            .await?;
        parse_for_each_ref(&stdout).map_err(|detail| {
            OracleError::new(OracleOperation::RecentBranchHeads, Vec::<String>::new(), detail)
        })
    }

    async fn current_branch(&self) -> Result<String, OracleError> {
        let output = self
            .run(OracleOperation::CurrentBranch, &[], &["symbolic-ref", "HEAD"])
            .await?;
        if !output.status.success() {
            let detail = failure_detail(&output);
            let detail = if detail.contains("not a symbolic ref") {
                "HEAD is not on a named branch".to_string()
            } else {
                detail
            };
            return Err(OracleError::new(OracleOperation::CurrentBranch, ["HEAD"], detail));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let full_ref = stdout.trim();
        branch_name(full_ref).map(str::to_string).ok_or_else(|| {
            OracleError::new(
                OracleOperation::CurrentBranch,
                ["HEAD"],
                format!("unexpected ref name: \"{full_ref}\""),
            )
        })
    }

    async fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, OracleError> {
        let refs = [ancestor, descendant];
        let output = self
            .run(
                OracleOperation::IsAncestor,
                &refs,
                &["merge-base", "--is-ancestor", ancestor, descendant],
            )
            .await?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(NOT_ANCESTOR_EXIT_CODE) => Ok(false),
            _ => Err(OracleError::new(
                OracleOperation::IsAncestor,
                refs,
                failure_detail(&output),
            )),
        }
    }

    async fn merge_base(&self, a: &str, b: &str) -> Result<String, OracleError> {
        let refs = [a, b];
        let hash = self
            .run_checked(OracleOperation::MergeBase, &refs, &["merge-base", a, b])
            .await?;
        if hash.is_empty() {
            return Err(OracleError::new(
                OracleOperation::MergeBase,
                refs,
                "git returned no merge base",
            ));
        }
        Ok(hash)
    }

    async fn logs(&self, branch: &str) -> Result<Vec<Commit>, OracleError> {
        let range = format!("{}..{branch}", self.trunk);
        let stdout = self
            .run_checked(
                OracleOperation::Logs,
                &[branch],
                &["log", "--pretty=format:%H%x09%s", range.as_str()],
            )
            .await?;
        parse_log(&stdout).map_err(|detail| OracleError::new(OracleOperation::Logs, [branch], detail))
    }
}
