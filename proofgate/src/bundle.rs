//! Bundling of evidence artefacts into a proofgate document.

use crate::error::{ProofgateError, Result};
use crate::{BUNDLE_FILE, STATE_FILE, STATE_HASH_FILE, TOOL, VERDICT_FILE};
use camino::Utf8Path;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use wfsl_repo_guard::Timestamp;

/// Marker printed when a bundle is written.
pub const BUNDLE_EMITTED: &str = "PROOFGATE_BUNDLE_EMITTED";

const BUNDLE_TYPE: &str = "proofgate";
const BUNDLE_VERSION: &str = "0.1.0";
const MANIFEST: &str = "proofgate.manifest.json";

/// The artefact file names a bundle refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artefacts {
    /// State snapshot.
    pub state: String,
    /// Recorded state digest.
    pub hash: String,
    /// Structural verdict.
    pub verdict: String,
}

impl Default for Artefacts {
    fn default() -> Self {
        Self {
            state: STATE_FILE.to_owned(),
            hash: STATE_HASH_FILE.to_owned(),
            verdict: VERDICT_FILE.to_owned(),
        }
    }
}

impl Artefacts {
    fn names(&self) -> [&str; 3] {
        [&self.state, &self.hash, &self.verdict]
    }
}

/// How the bundled artefacts were made reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Determinism {
    /// Hash algorithm.
    pub hash: String,
    /// What the hash covers.
    pub scope: String,
}

/// The bundle document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Emitting tool.
    pub tool: String,
    /// Always `proofgate`.
    pub bundle_type: String,
    /// Bundle format version.
    pub version: String,
    /// When the bundle was written.
    pub emitted_at: String,
    /// Name of the manifest the bundle belongs to.
    pub manifest: String,
    /// Referenced artefacts.
    pub artefacts: Artefacts,
    /// Reproducibility statement.
    pub determinism: Determinism,
}

impl Bundle {
    /// Creates the bundle document stamped with `emitted_at`.
    #[must_use]
    pub fn new(emitted_at: Timestamp) -> Self {
        Self {
            tool: TOOL.to_owned(),
            bundle_type: BUNDLE_TYPE.to_owned(),
            version: BUNDLE_VERSION.to_owned(),
            emitted_at: emitted_at.to_iso8601(),
            manifest: MANIFEST.to_owned(),
            artefacts: Artefacts::default(),
            determinism: Determinism {
                hash: "sha256".to_owned(),
                scope: "repository-structure".to_owned(),
            },
        }
    }
}

/// Writes `wfsl.repo.proofgate.bundle.json` into `evidence_dir`.
///
/// Artefacts are checked in state, hash, verdict order and the first absent
/// one is reported. Nothing is written unless all are present.
///
/// # Errors
///
/// Returns [`ProofgateError::MissingArtefact`] for an absent artefact, or a
/// serialization or write variant if the bundle cannot be written.
pub fn bundle(evidence_dir: &Utf8Path, emitted_at: Timestamp) -> Result<Bundle> {
    let bundle = Bundle::new(emitted_at);

    if let Some(missing) = bundle
        .artefacts
        .names()
        .into_iter()
        .find(|name| !evidence_dir.join(name).is_file())
    {
        return Err(ProofgateError::MissingArtefact {
            name: missing.to_owned(),
        });
    }

    let bundle_path = evidence_dir.join(BUNDLE_FILE);
    let json = serde_json::to_string_pretty(&bundle)?;
    fs::write(&bundle_path, json).map_err(|source| ProofgateError::Write {
        path: bundle_path.clone(),
        source,
    })?;
    debug!("bundle written to {bundle_path}");

    Ok(bundle)
}
