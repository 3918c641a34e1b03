//! Persists evidence records to disk.
//!
//! Each run gets its own directory named after the run identifier, holding
//! the JSON record and a markdown summary under fixed file names.

use crate::error::{GuardError, Result};
use crate::evidence::Evidence;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// File name of the JSON evidence record inside a run directory.
pub const EVIDENCE_JSON: &str = "repo-guard.evidence.json";

/// File name of the markdown summary inside a run directory.
pub const SUMMARY_MD: &str = "summary.md";

/// Directory name used beneath the root when no evidence directory is given.
pub const DEFAULT_EVIDENCE_DIR: &str = "evidence";

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenEvidence {
    /// Path of the JSON evidence record.
    pub json_path: Utf8PathBuf,
    /// Path of the markdown summary.
    pub md_path: Utf8PathBuf,
}

/// Returns the default evidence directory for `root`.
#[must_use]
pub fn default_evidence_dir(root: &Utf8Path) -> Utf8PathBuf {
    root.join(DEFAULT_EVIDENCE_DIR)
}

/// Writes `evidence` beneath `evidence_dir/<run_id>/`.
///
/// Parent directories are created as needed. A second run with the same
/// identifier overwrites the first.
///
/// # Errors
///
/// Returns [`GuardError::CreateEvidenceDir`] if the run directory cannot be
/// created, [`GuardError::Serialize`] if the record cannot be encoded, or
/// [`GuardError::WriteEvidence`] if either file cannot be written.
pub fn write_evidence(evidence_dir: &Utf8Path, evidence: &Evidence) -> Result<WrittenEvidence> {
    let run_dir = evidence_dir.join(evidence.run_id());
    fs::create_dir_all(&run_dir).map_err(|source| GuardError::CreateEvidenceDir {
        path: run_dir.clone(),
        source,
    })?;

    let json_path = run_dir.join(EVIDENCE_JSON);
    let md_path = run_dir.join(SUMMARY_MD);

    let mut json = serde_json::to_string_pretty(evidence)?;
    json.push('\n');
    write_file(&json_path, &json)?;
    write_file(&md_path, &render_markdown(evidence))?;

    debug!("evidence written to {run_dir}");
    Ok(WrittenEvidence { json_path, md_path })
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| GuardError::WriteEvidence {
        path: path.to_owned(),
        source,
    })
}

/// Renders the human-readable summary of an evidence record.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use wfsl_repo_guard::evidence::Evidence;
/// use wfsl_repo_guard::mode::Mode;
/// use wfsl_repo_guard::rules::Verdict;
/// use wfsl_repo_guard::sink::render_markdown;
/// use wfsl_repo_guard::timestamp::Timestamp;
///
/// let evidence = Evidence::build(
///     Utf8Path::new("/srv/repo"),
///     Mode::Repo,
///     Verdict::from_violations(Vec::new()),
///     Timestamp::from_epoch_millis(0),
/// );
/// let md = render_markdown(&evidence);
/// assert!(md.starts_with("# WFSL Repo Admission Guard Evidence\n"));
/// assert!(md.contains("- Outcome: **ADMITTED**"));
/// ```
#[must_use]
pub fn render_markdown(evidence: &Evidence) -> String {
    let mut md = String::from("# WFSL Repo Admission Guard Evidence\n\n");
    md.push_str(&format!("- Schema: `{}`\n", evidence.schema()));
    md.push_str(&format!("- Run ID: `{}`\n", evidence.run_id()));
    md.push_str(&format!("- Timestamp: `{}`\n", evidence.timestamp()));
    md.push_str(&format!("- Root: `{}`\n", evidence.root()));
    md.push_str(&format!("- Mode: `{}`\n", evidence.mode()));
    md.push_str(&format!("- Outcome: **{}**\n", evidence.outcome()));
    md.push_str(&format!("- Exit code: `{}`\n", evidence.exit_code()));
    md.push_str("\n## Findings\n\n");

    if evidence.findings().is_empty() {
        md.push_str("- None\n");
        return md;
    }

    for finding in evidence.findings() {
        md.push_str(&format!("- **{}**: {}\n", finding.code, finding.message));
        for path in finding.paths.iter().flatten() {
            md.push_str(&format!("  - Path: `{path}`\n"));
        }
        for missing in finding.missing.iter().flatten() {
            md.push_str(&format!("  - Missing: `{missing}`\n"));
        }
        if let Some(details) = &finding.details {
            let rendered = serde_json::to_string(details).unwrap_or_default();
            md.push_str(&format!("  - Details: `{rendered}`\n"));
        }
    }
    md
}
