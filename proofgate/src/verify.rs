//! Structural verification of the repository state snapshot.

use crate::digest::Sha256Digest;
use crate::error::{ProofgateError, Result};
use crate::{STATE_FILE, STATE_HASH_FILE, TOOL, VERDICT_FILE};
use camino::Utf8Path;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use wfsl_repo_guard::Timestamp;

/// Marker printed when verification passes.
pub const VERIFY_PASS: &str = "PROOFGATE_STRUCTURAL_VERIFY_PASS";

/// The verdict document written on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralVerdict {
    /// Emitting tool.
    pub tool: String,
    /// Always `structural`.
    pub guard_type: String,
    /// Always `PASS`; failures write no verdict.
    pub verdict: String,
    /// When verification ran.
    pub verified_at: String,
    /// The artefact that was hashed.
    pub artefact: String,
    /// Uppercase hex digest of the artefact.
    pub hash: String,
}

/// Verifies the state snapshot in `evidence_dir` against its recorded digest.
///
/// On success the verdict is written to `wfsl.repo.verdict.json` in the same
/// directory, replacing any previous one.
///
/// # Errors
///
/// Returns [`ProofgateError::StateEvidenceMissing`] or
/// [`ProofgateError::StateHashMissing`] when an input is absent,
/// [`ProofgateError::StateHashMismatch`] when the digests differ, and an
/// I/O or serialization variant when reading or writing fails.
pub fn verify_structural(
    evidence_dir: &Utf8Path,
    verified_at: Timestamp,
) -> Result<StructuralVerdict> {
    let state_path = evidence_dir.join(STATE_FILE);
    let hash_path = evidence_dir.join(STATE_HASH_FILE);

    if !state_path.is_file() {
        return Err(ProofgateError::StateEvidenceMissing { path: state_path });
    }
    if !hash_path.is_file() {
        return Err(ProofgateError::StateHashMissing { path: hash_path });
    }

    let actual = Sha256Digest::of_file(&state_path)?;
    let recorded = fs::read_to_string(&hash_path).map_err(|source| ProofgateError::Read {
        path: hash_path.clone(),
        source,
    })?;

    if !actual.matches_recorded(&recorded) {
        debug!(
            "state digest mismatch: recorded {}, computed {actual}",
            recorded.trim()
        );
        return Err(ProofgateError::StateHashMismatch {
            recorded: recorded.trim().to_owned(),
            actual,
        });
    }

    let verdict = StructuralVerdict {
        tool: TOOL.to_owned(),
        guard_type: "structural".to_owned(),
        verdict: "PASS".to_owned(),
        verified_at: verified_at.to_iso8601(),
        artefact: STATE_FILE.to_owned(),
        hash: actual.as_str().to_owned(),
    };

    let verdict_path = evidence_dir.join(VERDICT_FILE);
    let json = serde_json::to_string_pretty(&verdict)?;
    fs::write(&verdict_path, json).map_err(|source| ProofgateError::Write {
        path: verdict_path.clone(),
        source,
    })?;
    debug!("structural verdict written to {verdict_path}");

    Ok(verdict)
}
