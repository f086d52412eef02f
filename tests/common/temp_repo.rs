//! Temporary git repository for integration tests

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A throwaway git repository
///
/// Commits are empty so tests only shape history, never file contents.
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create a repository with an initial commit on `main`
    ///
    /// Returns `None` when `git` is not installed.
    pub fn try_new() -> Option<Self> {
        let available = Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success());
        if !available {
            eprintln!("git not available, skipping");
            return None;
        }

        let repo = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["checkout", "-q", "-b", "main"]);
        repo.commit("Initial commit");
        Some(repo)
    }

    /// Repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository, panicking on failure; returns trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args([
                "-c",
                "user.name=Test User",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create an empty commit on the current branch
    pub fn commit(&self, message: &str) {
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    /// Create `name` at HEAD, switch to it, and commit once
    pub fn branch_with_commit(&self, name: &str, message: &str) {
        self.git(&["checkout", "-q", "-b", name]);
        self.commit(message);
    }

    /// Switch to an existing branch
    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "-q", name]);
    }

    /// Commit hash of a ref
    pub fn rev_parse(&self, r: &str) -> String {
        self.git(&["rev-parse", r])
    }

    /// Build the standard stack:
    ///
    /// ```text
    /// main:         init - old
    /// old-merged:          old (fast-forwarded into main)
    /// feature-a:               - A
    /// feature-b:                   - B
    /// feature-c:                       - C   (checked out)
    /// ```
    pub fn build_standard_stack(&self) {
        self.branch_with_commit("old-merged", "Old work");
        self.checkout("main");
        self.git(&["merge", "-q", "--ff-only", "old-merged"]);
        self.branch_with_commit("feature-a", "Add A");
        self.branch_with_commit("feature-b", "Add B");
        self.branch_with_commit("feature-c", "Add C");
    }
}
