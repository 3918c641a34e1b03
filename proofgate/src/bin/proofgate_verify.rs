//! Verifies the repository state snapshot against its recorded digest.

use clap::Parser;
use proofgate::cli::{EvidenceArgs, exit_code_for_run_result, write_marker};
use proofgate::error::Result;
use proofgate::verify::{VERIFY_PASS, verify_structural};
use std::io::Write;
use wfsl_repo_guard::paths::current_dir;
use wfsl_repo_guard::{Timestamp, logging};

/// Recompute the state digest and write `wfsl.repo.verdict.json` on a match.
#[derive(Parser, Debug)]
#[command(name = "proofgate-verify", version, about)]
struct Cli {
    #[command(flatten)]
    evidence: EvidenceArgs,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.evidence.log_filter());

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let evidence_dir = cli.evidence.resolve(&current_dir()?);
    verify_structural(&evidence_dir, Timestamp::now()?)?;
    write_marker(stdout, VERIFY_PASS)
}
