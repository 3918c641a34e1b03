//! Read-only queries against a git working copy.
//!
//! Every query is a separate `git` invocation with no caching between
//! them. Failures never escape: a missing git binary, a directory that is
//! not a working copy, or a query that does not apply all end up as a
//! [`GitFact`] that is not [`GitFact::Present`].

use crate::exec::CommandExecutor;
use crate::fs_probe::is_directory;
use camino::Utf8Path;
use log::{debug, warn};
use std::process::Output;

const REMOTE_ARGS: &[&str] = &["remote"];
const TAG_ARGS: &[&str] = &["tag"];
const HEAD_ARGS: &[&str] = &["rev-parse", "--verify", "HEAD"];
const UPSTREAM_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"];

/// The answer to one git query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitFact {
    /// The queried thing exists.
    Present,
    /// Git answered and the queried thing does not exist.
    Absent,
    /// Git could not answer (not installed, or the query itself failed).
    Unavailable,
}

impl GitFact {
    /// Collapses the fact to the boolean the v1 rules consume.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::git::GitFact;
    ///
    /// assert!(GitFact::Present.is_present());
    /// assert!(!GitFact::Unavailable.is_present());
    /// ```
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// The four git facts gathered for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitSnapshot {
    /// Whether `git tag` lists anything.
    pub tags: GitFact,
    /// Whether `git remote` lists anything.
    pub remote: GitFact,
    /// Whether `HEAD` resolves to a commit.
    pub commits: GitFact,
    /// Whether the current branch tracks an upstream.
    pub upstream: GitFact,
}

/// Runs git queries against a single root through an executor.
pub struct GitProbe<'a> {
    executor: &'a dyn CommandExecutor,
    root: &'a Utf8Path,
}

impl<'a> GitProbe<'a> {
    /// Creates a probe for `root`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor, root: &'a Utf8Path) -> Self {
        Self { executor, root }
    }

    /// Returns true when `.git` is a directory directly under the root.
    ///
    /// Parent directories are not searched, so a subdirectory of a working
    /// copy is not itself a repository.
    #[must_use]
    pub fn is_git_repo(&self) -> bool {
        is_directory(&self.root.join(".git"))
    }

    /// Checks whether at least one remote is configured.
    #[must_use]
    pub fn has_remote(&self) -> GitFact {
        self.lists_anything(REMOTE_ARGS)
    }

    /// Checks whether at least one tag exists.
    #[must_use]
    pub fn has_tags(&self) -> GitFact {
        self.lists_anything(TAG_ARGS)
    }

    /// Checks whether `HEAD` resolves to a valid commit.
    #[must_use]
    pub fn has_commits(&self) -> GitFact {
        self.resolves(HEAD_ARGS)
    }

    /// Checks whether the current branch has an upstream configured.
    #[must_use]
    pub fn has_upstream_tracking(&self) -> GitFact {
        self.resolves(UPSTREAM_ARGS)
    }

    /// Gathers tags, remote, commits, and upstream, in that order.
    #[must_use]
    pub fn snapshot(&self) -> GitSnapshot {
        let snapshot = GitSnapshot {
            tags: self.has_tags(),
            remote: self.has_remote(),
            commits: self.has_commits(),
            upstream: self.has_upstream_tracking(),
        };
        debug!("git state for {}: {snapshot:?}", self.root);
        snapshot
    }

    /// Listing queries: a clean exit with non-blank stdout means present.
    fn lists_anything(&self, args: &[&str]) -> GitFact {
        match self.query(args) {
            Some(output) if output.status.success() => {
                if String::from_utf8_lossy(&output.stdout).trim().is_empty() {
                    GitFact::Absent
                } else {
                    GitFact::Present
                }
            }
            Some(output) => {
                warn!(
                    "git {} failed in {}: {}",
                    args.join(" "),
                    self.root,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                GitFact::Unavailable
            }
            None => GitFact::Unavailable,
        }
    }

    /// Resolution queries: a non-zero exit means the ref does not resolve.
    fn resolves(&self, args: &[&str]) -> GitFact {
        match self.query(args) {
            Some(output) if output.status.success() => GitFact::Present,
            Some(_) => GitFact::Absent,
            None => GitFact::Unavailable,
        }
    }

    fn query(&self, args: &[&str]) -> Option<Output> {
        debug!("running git {} in {}", args.join(" "), self.root);
        match self.executor.run(self.root, "git", args) {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("git unavailable for {}: {err}", self.root);
                None
            }
        }
    }
}
