//! The evidence record produced by one guard invocation.
//!
//! [`Evidence::build`] is pure: it takes a verdict and a timestamp and
//! produces the immutable record. The exit code is derived from the
//! outcome, so the two can never disagree.

use crate::exec::CommandExecutor;
use crate::finding::Finding;
use crate::mode::Mode;
use crate::rules::{Outcome, Verdict, evaluate};
use crate::timestamp::Timestamp;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Schema identifier stamped on every evidence record.
pub const SCHEMA_ID: &str = "wfsl.repo-guard.v1";

/// The structured, persisted result of one invocation.
///
/// Field order matches the published JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    schema: String,
    run_id: String,
    timestamp: String,
    root: Utf8PathBuf,
    mode: Mode,
    outcome: Outcome,
    exit_code: i32,
    findings: Vec<Finding>,
}

impl Evidence {
    /// Assembles the record for `verdict`.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use wfsl_repo_guard::evidence::Evidence;
    /// use wfsl_repo_guard::mode::Mode;
    /// use wfsl_repo_guard::rules::{Outcome, Verdict};
    /// use wfsl_repo_guard::timestamp::Timestamp;
    ///
    /// let evidence = Evidence::build(
    ///     Utf8Path::new("/srv/repo"),
    ///     Mode::Repo,
    ///     Verdict::from_violations(Vec::new()),
    ///     Timestamp::from_epoch_millis(0),
    /// );
    /// assert_eq!(evidence.outcome(), Outcome::Admitted);
    /// assert_eq!(evidence.exit_code(), 0);
    /// assert_eq!(evidence.run_id(), "1970-01-01T00-00-00-000Z");
    /// ```
    #[must_use]
    pub fn build(root: &Utf8Path, mode: Mode, verdict: Verdict, timestamp: Timestamp) -> Self {
        let (outcome, findings) = verdict.into_parts();
        Self {
            schema: SCHEMA_ID.to_owned(),
            run_id: timestamp.run_id(),
            timestamp: timestamp.to_iso8601(),
            root: root.to_owned(),
            mode,
            outcome,
            exit_code: outcome.exit_code(),
            findings,
        }
    }

    /// Returns the schema identifier.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns the path-safe run identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Returns the ISO 8601 timestamp of the run.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the absolute root that was checked.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the mode the check ran under.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the process exit code matching the outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns the findings in evaluation order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Returns true when the outcome is admitted.
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        self.outcome == Outcome::Admitted
    }
}

/// Inputs for one check, passed explicitly rather than read from the
/// process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Absolute root to inspect.
    pub root: Utf8PathBuf,
    /// Mode to check under.
    pub mode: Mode,
    /// Instant the run is stamped with.
    pub timestamp: Timestamp,
}

/// Evaluates the request and wraps the verdict into an evidence record.
#[must_use]
pub fn check(request: &CheckRequest, executor: &dyn CommandExecutor) -> Evidence {
    let verdict = evaluate(&request.root, request.mode, executor);
    Evidence::build(&request.root, request.mode, verdict, request.timestamp)
}
