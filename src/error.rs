//! Error types for the repository guard.
//!
//! Rule violations are never errors: they are reported as findings inside
//! the evidence record. The variants here cover the surrounding plumbing
//! (clock, configuration, evidence persistence) which the CLI maps to exit
//! code 2.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur around a guard invocation.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The supplied root could not be expressed as a UTF-8 path.
    #[error("root path is not valid UTF-8: {reason}")]
    NonUtf8Path {
        /// Description of the conversion failure.
        reason: String,
    },

    /// The current working directory could not be determined.
    #[error("failed to read the current directory: {source}")]
    CurrentDir {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The system clock reported a time before the Unix epoch.
    #[error("system clock is before the Unix epoch: {0}")]
    Clock(#[from] std::time::SystemTimeError),

    /// A timestamp string did not match `YYYY-MM-DDThh:mm:ss.mmmZ`.
    #[error("invalid timestamp \"{value}\": expected YYYY-MM-DDThh:mm:ss.mmmZ")]
    InvalidTimestamp {
        /// The rejected timestamp string.
        value: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a valid v1 guard configuration.
    #[error("invalid config {path}: {reason}")]
    InvalidConfig {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the validation failure.
        reason: String,
    },

    /// Creating the per-run evidence directory failed.
    #[error("failed to create evidence directory {path}: {source}")]
    CreateEvidenceDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an evidence file failed.
    #[error("failed to write evidence file {path}: {source}")]
    WriteEvidence {
        /// File that could not be written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the evidence record failed.
    #[error("failed to serialize evidence: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing console output failed.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },

    /// A command could not be spawned.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`GuardError`].
pub type Result<T> = std::result::Result<T, GuardError>;
