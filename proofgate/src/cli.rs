//! Arguments and console plumbing shared by the proofgate binaries.

use crate::error::{ProofgateError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use std::io::Write;
use wfsl_repo_guard::paths::resolve_root;

/// Arguments common to both binaries.
#[derive(Args, Debug, Clone)]
pub struct EvidenceArgs {
    /// Directory holding the evidence artefacts, relative to the current directory.
    #[arg(long, value_name = "DIR", default_value = "evidence")]
    pub evidence_dir: Utf8PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl EvidenceArgs {
    /// Resolves the evidence directory against `cwd`.
    #[must_use]
    pub fn resolve(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        resolve_root(cwd, &self.evidence_dir)
    }

    /// Returns the log filter directive for the verbosity flag.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Writes the success marker to `stdout`.
///
/// # Errors
///
/// Returns [`ProofgateError::WriteFailed`] if the write fails.
pub fn write_marker(stdout: &mut dyn Write, marker: &str) -> Result<()> {
    writeln!(stdout, "{marker}").map_err(|source| ProofgateError::WriteFailed { source })
}

/// Maps a run result to an exit code, reporting any failure on `stderr`.
pub fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            if writeln!(stderr, "{err}").is_err() {
                // Best-effort reporting; the exit code still carries the failure.
            }
            err.exit_code()
        }
    }
}
