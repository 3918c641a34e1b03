//! Proofgate consumers for WFSL repository evidence.
//!
//! Two downstream steps read a fixed set of artefacts from an evidence
//! directory:
//!
//! - [`verify::verify_structural`] recomputes the SHA-256 of the repository
//!   state snapshot, compares it with the recorded digest, and writes a
//!   structural verdict.
//! - [`bundle::bundle`] checks that every artefact is present and writes a
//!   bundle document pointing at them.
//!
//! Neither step interprets the guard's evidence record; they agree with it
//! only on file names.

pub mod bundle;
pub mod cli;
pub mod digest;
pub mod error;
pub mod verify;

pub use error::{ProofgateError, Result};

/// Tool name stamped on every emitted document.
pub const TOOL: &str = "wfsl-repo-guard";

/// Repository state snapshot.
pub const STATE_FILE: &str = "wfsl.repo.state.txt";

/// Recorded SHA-256 of the state snapshot.
pub const STATE_HASH_FILE: &str = "wfsl.repo.state.sha256";

/// Structural verdict written by the verifier.
pub const VERDICT_FILE: &str = "wfsl.repo.verdict.json";

/// Bundle document written by the bundler.
pub const BUNDLE_FILE: &str = "wfsl.repo.proofgate.bundle.json";
