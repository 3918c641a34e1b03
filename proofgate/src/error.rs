//! Error types for the proofgate consumers.
//!
//! The contract failures display as the bare marker a pipeline greps for
//! (`STATE_HASH_MISMATCH`, `MISSING_ARTEFACT: <name>`, ...). Everything
//! else is an operational failure.

use crate::digest::Sha256Digest;
use camino::Utf8PathBuf;
use thiserror::Error;
use wfsl_repo_guard::GuardError;

/// Errors raised while bundling or verifying evidence artefacts.
#[derive(Debug, Error)]
pub enum ProofgateError {
    /// A required artefact is absent from the evidence directory.
    #[error("MISSING_ARTEFACT: {name}")]
    MissingArtefact {
        /// File name of the absent artefact.
        name: String,
    },

    /// The repository state snapshot is absent.
    #[error("STATE_EVIDENCE_MISSING")]
    StateEvidenceMissing {
        /// Where the snapshot was expected.
        path: Utf8PathBuf,
    },

    /// The recorded state digest is absent.
    #[error("STATE_HASH_MISSING")]
    StateHashMissing {
        /// Where the digest was expected.
        path: Utf8PathBuf,
    },

    /// The recorded digest does not match the state snapshot.
    #[error("STATE_HASH_MISMATCH")]
    StateHashMismatch {
        /// The digest read from the hash file, trimmed.
        recorded: String,
        /// The digest computed from the snapshot.
        actual: Sha256Digest,
    },

    /// Reading an artefact failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The artefact being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an output document failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The document being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing an output document failed.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Resolving paths or reading the clock failed.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// Writing console output failed.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

impl ProofgateError {
    /// Returns the process exit code for this failure.
    ///
    /// Absent inputs exit 1. A digest mismatch and every operational
    /// failure exit 2.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArtefact { .. }
            | Self::StateEvidenceMissing { .. }
            | Self::StateHashMissing { .. } => 1,
            Self::StateHashMismatch { .. }
            | Self::Read { .. }
            | Self::Write { .. }
            | Self::Serialize(_)
            | Self::Guard(_)
            | Self::WriteFailed { .. } => 2,
        }
    }
}

/// Result type alias using [`ProofgateError`].
pub type Result<T> = std::result::Result<T, ProofgateError>;
