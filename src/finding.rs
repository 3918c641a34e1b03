//! Findings reported by an evaluation.
//!
//! A [`Finding`] carries everything needed to report it on its own: a
//! stable code, a message, and whichever path lists or git facts explain
//! it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    /// Informational marker placed in an admitted record.
    RepoAdmitted,
    /// One or more forbidden paths exist.
    ForbiddenArtifactPresent,
    /// One or more required paths are missing.
    RequiredFileMissing,
    /// Tags exist ahead of a remote or an initial commit.
    InvalidReleaseSequence,
    /// The marketplace git contract is not met.
    MarketplaceContractViolation,
    /// The root is missing or not a directory.
    CheckFailed,
}

impl FindingCode {
    /// Returns the wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RepoAdmitted => "REPO_ADMITTED",
            Self::ForbiddenArtifactPresent => "FORBIDDEN_ARTIFACT_PRESENT",
            Self::RequiredFileMissing => "REQUIRED_FILE_MISSING",
            Self::InvalidReleaseSequence => "INVALID_RELEASE_SEQUENCE",
            Self::MarketplaceContractViolation => "MARKETPLACE_CONTRACT_VIOLATION",
            Self::CheckFailed => "CHECK_FAILED",
        }
    }

    /// Returns false only for the informational admission marker.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        !matches!(self, Self::RepoAdmitted)
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git-state facts attached to a finding, keyed by name.
pub type FindingDetails = BTreeMap<String, Value>;

/// One reported violation or informational note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The finding code.
    pub code: FindingCode,
    /// Human-readable explanation.
    pub message: String,
    /// Offending paths, relative to the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    /// Missing paths, relative to the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    /// Free-form facts behind the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FindingDetails>,
}

impl Finding {
    /// Creates a finding with only a code and message.
    #[must_use]
    pub fn new(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            paths: None,
            missing: None,
            details: None,
        }
    }

    /// Attaches offending paths.
    #[must_use]
    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Attaches missing paths.
    #[must_use]
    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = Some(missing);
        self
    }

    /// Attaches a detail entry, creating the map on first use.
    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_owned(), value.into());
        self
    }

    /// Renders the finding as console report lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::finding::{Finding, FindingCode};
    ///
    /// let finding = Finding::new(FindingCode::RequiredFileMissing, "Missing files.")
    ///     .with_missing(vec!["LICENSE".to_owned()]);
    /// assert_eq!(
    ///     finding.report_lines(),
    ///     vec![
    ///         "- REQUIRED_FILE_MISSING: Missing files.".to_owned(),
    ///         "  - Missing: LICENSE".to_owned(),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("- {}: {}", self.code, self.message)];
        for path in self.paths.iter().flatten() {
            lines.push(format!("  - Path: {path}"));
        }
        for missing in self.missing.iter().flatten() {
            lines.push(format!("  - Missing: {missing}"));
        }
        lines
    }
}
