//! The v1 admission rules.
//!
//! [`evaluate`] runs every applicable rule in one pass and collects all
//! findings; no rule short-circuits another. Only an invalid root stops
//! evaluation early, producing an [`Outcome::Error`] verdict.

use crate::exec::CommandExecutor;
use crate::finding::{Finding, FindingCode};
use crate::fs_probe::{find_forbidden, find_missing, is_directory};
use crate::git::{GitFact, GitProbe, GitSnapshot};
use crate::mode::Mode;
use camino::Utf8Path;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

const ADMITTED_MESSAGE: &str = "Repository admitted. No violations detected in v1 ruleset.";
const CHECK_FAILED_MESSAGE: &str = "Root path does not exist or is not a directory.";
const FORBIDDEN_MESSAGE: &str =
    "Repository contains forbidden artefacts that must not be committed.";
const MISSING_MESSAGE: &str = "Repository is missing required files.";
const TAGS_BEFORE_REMOTE_MESSAGE: &str = concat!(
    "Tags exist but no git remote is configured. ",
    "Create the GitHub repo and add remote before tagging or pushing tags."
);
const TAGS_BEFORE_COMMIT_MESSAGE: &str =
    "Tags exist but repository has no commits. Create an initial commit before tagging.";
const NO_UPSTREAM_MESSAGE: &str = concat!(
    "Marketplace mode expects the current branch to track an upstream remote. ",
    "Push with -u to set upstream."
);
const NO_GIT_MESSAGE: &str = concat!(
    "Marketplace mode expects a git repository (missing .git directory). ",
    "Initialise git and commit before publishing."
);

/// The overall result of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// No violations were found.
    Admitted,
    /// At least one rule was violated.
    Refused,
    /// The root could not be checked at all.
    Error,
}

impl Outcome {
    /// Returns the process exit code for this outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::rules::Outcome;
    ///
    /// assert_eq!(Outcome::Admitted.exit_code(), 0);
    /// assert_eq!(Outcome::Refused.exit_code(), 1);
    /// assert_eq!(Outcome::Error.exit_code(), 2);
    /// ```
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Admitted => 0,
            Self::Refused => 1,
            Self::Error => 2,
        }
    }

    /// Returns the wire name of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admitted => "ADMITTED",
            Self::Refused => "REFUSED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outcome together with the findings that justify it.
///
/// Only the constructors below can build a verdict, so an admitted verdict
/// never carries a violation and a refused one always does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    outcome: Outcome,
    findings: Vec<Finding>,
}

impl Verdict {
    /// Builds a verdict from the violations collected by the rules.
    ///
    /// An empty list becomes an admitted verdict holding the single
    /// `REPO_ADMITTED` marker.
    #[must_use]
    pub fn from_violations(violations: Vec<Finding>) -> Self {
        if violations.is_empty() {
            return Self {
                outcome: Outcome::Admitted,
                findings: vec![Finding::new(FindingCode::RepoAdmitted, ADMITTED_MESSAGE)],
            };
        }
        Self {
            outcome: Outcome::Refused,
            findings: violations,
        }
    }

    /// Builds the verdict for a root that is missing or not a directory.
    #[must_use]
    pub fn check_failed(root: &Utf8Path) -> Self {
        Self {
            outcome: Outcome::Error,
            findings: vec![
                Finding::new(FindingCode::CheckFailed, CHECK_FAILED_MESSAGE)
                    .with_detail("root", root.as_str()),
            ],
        }
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the findings in evaluation order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Splits the verdict into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Outcome, Vec<Finding>) {
        (self.outcome, self.findings)
    }
}

/// Evaluates `root` under `mode`.
///
/// `root` must already be absolute. Git queries go through `executor`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use wfsl_repo_guard::exec::SystemCommandExecutor;
/// use wfsl_repo_guard::mode::Mode;
/// use wfsl_repo_guard::rules::{Outcome, evaluate};
///
/// let verdict = evaluate(
///     Utf8Path::new("/definitely/not/a/repository"),
///     Mode::Repo,
///     &SystemCommandExecutor,
/// );
/// assert_eq!(verdict.outcome(), Outcome::Error);
/// ```
#[must_use]
pub fn evaluate(root: &Utf8Path, mode: Mode, executor: &dyn CommandExecutor) -> Verdict {
    if !is_directory(root) {
        warn!("root {root} does not exist or is not a directory");
        return Verdict::check_failed(root);
    }

    let rules = mode.rule_set();
    let mut violations = Vec::new();

    let forbidden = find_forbidden(root, rules.forbidden());
    if !forbidden.is_empty() {
        violations.push(
            Finding::new(FindingCode::ForbiddenArtifactPresent, FORBIDDEN_MESSAGE)
                .with_paths(forbidden),
        );
    }

    let missing = find_missing(root, rules.required());
    if !missing.is_empty() {
        violations.push(
            Finding::new(FindingCode::RequiredFileMissing, MISSING_MESSAGE).with_missing(missing),
        );
    }

    let git = GitProbe::new(executor, root);
    if git.is_git_repo() {
        let snapshot = git.snapshot();
        log_unavailable(&snapshot);
        violations.extend(release_sequence_findings(mode, &snapshot));
    } else if mode.is_marketplace() {
        violations.push(Finding::new(
            FindingCode::MarketplaceContractViolation,
            NO_GIT_MESSAGE,
        ));
    }

    debug!("{} violation(s) under {mode} mode for {root}", violations.len());
    Verdict::from_violations(violations)
}

/// Applies the git sequencing rules to an already gathered snapshot.
///
/// The two tag rules are independent and may both fire.
#[must_use]
pub fn release_sequence_findings(mode: Mode, snapshot: &GitSnapshot) -> Vec<Finding> {
    let has_tags = snapshot.tags.is_present();
    let has_remote = snapshot.remote.is_present();
    let has_commits = snapshot.commits.is_present();
    let has_upstream = snapshot.upstream.is_present();

    let mut findings = Vec::new();

    if has_tags && !has_remote {
        findings.push(
            Finding::new(
                FindingCode::InvalidReleaseSequence,
                TAGS_BEFORE_REMOTE_MESSAGE,
            )
            .with_detail("hasTags", has_tags)
            .with_detail("hasRemote", has_remote),
        );
    }

    if has_tags && !has_commits {
        findings.push(
            Finding::new(
                FindingCode::InvalidReleaseSequence,
                TAGS_BEFORE_COMMIT_MESSAGE,
            )
            .with_detail("hasTags", has_tags)
            .with_detail("hasCommits", has_commits),
        );
    }

    if mode.is_marketplace() && has_remote && !has_upstream {
        findings.push(
            Finding::new(
                FindingCode::MarketplaceContractViolation,
                NO_UPSTREAM_MESSAGE,
            )
            .with_detail("hasRemote", has_remote)
            .with_detail("hasUpstream", has_upstream),
        );
    }

    findings
}

fn log_unavailable(snapshot: &GitSnapshot) {
    let facts = [
        ("tags", snapshot.tags),
        ("remote", snapshot.remote),
        ("commits", snapshot.commits),
        ("upstream", snapshot.upstream),
    ];
    for (name, fact) in facts {
        if fact == GitFact::Unavailable {
            warn!("git {name} query unavailable; treating as absent");
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
