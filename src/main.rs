//! WFSL repository guard CLI entrypoint.
//!
//! Checks a repository root, writes the evidence record, prints a short
//! report, and exits with the outcome's exit code.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, warn};
use std::io::Write;
use wfsl_repo_guard::cli::{CheckArgs, Cli, Command};
use wfsl_repo_guard::config::GuardConfig;
use wfsl_repo_guard::error::{GuardError, Result};
use wfsl_repo_guard::evidence::{CheckRequest, Evidence, check};
use wfsl_repo_guard::exec::{CommandExecutor, SystemCommandExecutor};
use wfsl_repo_guard::logging;
use wfsl_repo_guard::mode::Mode;
use wfsl_repo_guard::paths::{current_dir, resolve_root};
use wfsl_repo_guard::rules::Outcome;
use wfsl_repo_guard::sink::{default_evidence_dir, write_evidence};
use wfsl_repo_guard::timestamp::Timestamp;

/// Exit code for failures around the check itself.
const OPERATIONAL_FAILURE: i32 = 2;

struct Console<'a> {
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_filter());

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = current_dir().and_then(|cwd| {
        let mut console = Console {
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        run(&cli, &cwd, &SystemCommandExecutor, &mut console)
    });
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    cwd: &Utf8Path,
    executor: &dyn CommandExecutor,
    console: &mut Console<'_>,
) -> Result<i32> {
    match &cli.command {
        Command::Check(args) => run_check(args, cwd, executor, console),
    }
}

fn run_check(
    args: &CheckArgs,
    cwd: &Utf8Path,
    executor: &dyn CommandExecutor,
    console: &mut Console<'_>,
) -> Result<i32> {
    let mode = select_mode(args.mode.as_deref());
    if let Some(config) = &args.config {
        validate_config(&resolve_root(cwd, config), mode)?;
    }
    let timestamp = resolve_timestamp(args.timestamp.as_deref())?;

    let request = CheckRequest {
        root: resolve_root(cwd, &args.root),
        mode,
        timestamp,
    };
    let evidence = check(&request, executor);

    if !args.quiet {
        write_line(console.stdout, "WFSL Repo Guard v1")?;
        write_line(console.stdout, format!("Mode: {}", evidence.mode()))?;
        write_line(console.stdout, format!("Root: {}", evidence.root()))?;
        write_line(console.stdout, format!("Outcome: {}", evidence.outcome()))?;
    }

    if let Some(evidence_dir) = evidence_dir_for(args, cwd, &evidence) {
        let written = write_evidence(&evidence_dir, &evidence)?;
        if !args.quiet {
            write_line(console.stdout, format!("Wrote: {}", written.json_path))?;
            write_line(console.stdout, format!("Wrote: {}", written.md_path))?;
        }
    } else {
        debug!("not persisting evidence for an unreadable root");
    }

    if !evidence.is_admitted() {
        for finding in evidence.findings() {
            for line in finding.report_lines() {
                write_line(console.stderr, line)?;
            }
        }
    }

    Ok(evidence.exit_code())
}

fn select_mode(raw: Option<&str>) -> Mode {
    let selection = Mode::coerce(raw);
    if selection.fell_back {
        warn!(
            "unrecognised mode {:?}; falling back to {}",
            raw.unwrap_or_default(),
            selection.mode
        );
    }
    selection.mode
}

fn validate_config(path: &Utf8Path, mode: Mode) -> Result<()> {
    let config = GuardConfig::load(path)?;
    if config.declares_overrides_for(mode) {
        warn!("{path} declares {mode} mode_defaults; v1 applies the fixed rule set");
    } else {
        debug!("config {path} validated");
    }
    Ok(())
}

fn resolve_timestamp(raw: Option<&str>) -> Result<Timestamp> {
    raw.map_or_else(Timestamp::now, Timestamp::parse_iso8601)
}

/// Picks where evidence goes, or `None` when it should not be written.
///
/// The default location lives inside the root, so an errored check is only
/// persisted when the caller named a directory explicitly.
fn evidence_dir_for(args: &CheckArgs, cwd: &Utf8Path, evidence: &Evidence) -> Option<Utf8PathBuf> {
    match &args.evidence_dir {
        Some(dir) => Some(resolve_root(cwd, dir)),
        None if evidence.outcome() == Outcome::Error => None,
        None => Some(default_evidence_dir(evidence.root())),
    }
}

fn exit_code_for_run_result(result: Result<i32>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            write_stderr_line(stderr, format!("WFSL Repo Guard failed: {err}"));
            OPERATIONAL_FAILURE
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{message}").map_err(|source| GuardError::WriteFailed { source })
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
