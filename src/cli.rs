//! CLI argument definitions for the repository guard.
//!
//! Kept apart from the binary entrypoint so the argument surface can be
//! parsed and tested without running a check.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// WFSL repository admission guard.
#[derive(Parser, Debug)]
#[command(name = "wfsl-repo-guard")]
#[command(version, about)]
#[command(long_about = concat!(
    "WFSL repository admission guard.\n\n",
    "Inspects a repository root against the v1 admission rules and writes an ",
    "evidence record (JSON and markdown) for every run. The process exit code ",
    "is 0 when admitted, 1 when refused, and 2 when the check could not run.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check the current directory:\n",
    "    $ wfsl-repo-guard check --root . --mode repo\n\n",
    "  Check a repository before marketplace publication:\n",
    "    $ wfsl-repo-guard check --root ../my-action --mode marketplace\n\n",
    "  Write evidence elsewhere with a fixed timestamp:\n",
    "    $ wfsl-repo-guard check --evidence-dir /tmp/ev --timestamp 2026-01-01T00:00:00.000Z",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the log filter directive implied by the verbosity flags.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match &self.command {
            Command::Check(args) => args.log_filter(),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a repository root and write evidence.
    Check(CheckArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Repository root to inspect, relative to the current directory.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub root: Utf8PathBuf,

    /// Rule set to apply: `repo` or `marketplace`. Unknown values fall back to `repo`.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Directory that receives per-run evidence [default: <root>/evidence].
    #[arg(long, value_name = "DIR")]
    pub evidence_dir: Option<Utf8PathBuf>,

    /// Validate a `repo-guard.toml` configuration before checking.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Stamp the run with this instant instead of the system clock.
    #[arg(long, value_name = "YYYY-MM-DDThh:mm:ss.mmmZ")]
    pub timestamp: Option<String>,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress the stdout report (findings and errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl CheckArgs {
    /// Returns the log filter directive for these flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::cli::CheckArgs;
    ///
    /// let args = CheckArgs { verbosity: 2, ..CheckArgs::default() };
    /// assert_eq!(args.log_filter(), "trace");
    /// ```
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Default for CheckArgs {
    /// Matches the values clap produces for a bare `check`.
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            mode: None,
            evidence_dir: None,
            config: None,
            timestamp: None,
            verbosity: 0,
            quiet: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
