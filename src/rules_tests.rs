//! Unit tests for the admission rules.

use super::*;
use crate::test_utils::{ExpectedCall, StubExecutor};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

const UPSTREAM: &[&str] = &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"];
const HEAD: &[&str] = &["rev-parse", "--verify", "HEAD"];

struct Scratch {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Scratch {
    fn touch(&self, relative: &str) -> &Self {
        fs::write(self.root.join(relative), "content").expect("write file");
        self
    }

    fn mkdir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root.join(relative)).expect("create dir");
        self
    }

    fn compliant(&self, mode: Mode) -> &Self {
        for path in mode.rule_set().required() {
            self.touch(path);
        }
        self
    }
}

#[fixture]
fn scratch() -> Scratch {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp path");
    Scratch { _dir: dir, root }
}

/// Scripts the four snapshot queries in probe order.
fn git_state(tags: bool, remote: bool, commits: bool, upstream: bool) -> StubExecutor {
    let list = |args: &[&'static str], present: bool, value: &str| {
        ExpectedCall::git_ok(args, if present { value } else { "" })
    };
    let resolve = |args: &[&'static str], present: bool| {
        if present {
            ExpectedCall::git_ok(args, "ok\n")
        } else {
            ExpectedCall::git_fails(args, 128)
        }
    };
    StubExecutor::new(vec![
        list(&["tag"], tags, "v1.0.0\n"),
        list(&["remote"], remote, "origin\n"),
        resolve(HEAD, commits),
        resolve(UPSTREAM, upstream),
    ])
}

fn codes(verdict: &Verdict) -> Vec<FindingCode> {
    verdict.findings().iter().map(|f| f.code).collect()
}

#[rstest]
fn forbidden_and_missing_are_reported_together(scratch: Scratch) {
    scratch.touch(".gitignore").touch("README.md").mkdir("node_modules");
    let stub = StubExecutor::new(Vec::new());

    let verdict = evaluate(&scratch.root, Mode::Repo, &stub);

    assert_eq!(verdict.outcome(), Outcome::Refused);
    assert_eq!(verdict.outcome().exit_code(), 1);
    assert_eq!(
        codes(&verdict),
        vec![
            FindingCode::ForbiddenArtifactPresent,
            FindingCode::RequiredFileMissing
        ]
    );
    let findings = verdict.findings();
    assert_eq!(
        findings.first().and_then(|f| f.paths.clone()),
        Some(vec!["node_modules".to_owned()])
    );
    assert_eq!(
        findings.get(1).and_then(|f| f.missing.clone()),
        Some(vec!["LICENSE".to_owned()])
    );
}

#[rstest]
fn marketplace_without_git_skips_git_queries(scratch: Scratch) {
    scratch.compliant(Mode::Marketplace);
    let stub = StubExecutor::new(Vec::new());

    let verdict = evaluate(&scratch.root, Mode::Marketplace, &stub);

    assert_eq!(verdict.outcome(), Outcome::Refused);
    assert_eq!(
        codes(&verdict),
        vec![FindingCode::MarketplaceContractViolation]
    );
    let message = verdict
        .findings()
        .first()
        .map(|f| f.message.clone())
        .unwrap_or_default();
    assert!(message.contains("missing .git directory"), "got: {message}");
    assert_eq!(stub.invocation_count(), 0);
}

#[rstest]
fn repo_without_git_is_admitted(scratch: Scratch) {
    scratch.compliant(Mode::Repo);
    let stub = StubExecutor::new(Vec::new());

    let verdict = evaluate(&scratch.root, Mode::Repo, &stub);

    assert_eq!(verdict.outcome(), Outcome::Admitted);
    assert_eq!(codes(&verdict), vec![FindingCode::RepoAdmitted]);
}

#[rstest]
fn tags_without_commits_or_remote_fire_both_sequence_rules(scratch: Scratch) {
    scratch.compliant(Mode::Repo).mkdir(".git");
    let stub = git_state(true, false, false, false);

    let verdict = evaluate(&scratch.root, Mode::Repo, &stub);

    assert_eq!(
        codes(&verdict),
        vec![
            FindingCode::InvalidReleaseSequence,
            FindingCode::InvalidReleaseSequence
        ]
    );
    let messages: Vec<&str> = verdict
        .findings()
        .iter()
        .map(|f| f.message.as_str())
        .collect();
    assert!(messages.iter().any(|m| m.contains("no git remote")));
    assert!(messages.iter().any(|m| m.contains("no commits")));
    assert!(stub.is_finished());
}

#[rstest]
fn compliant_marketplace_root_is_admitted(scratch: Scratch) {
    scratch.compliant(Mode::Marketplace).mkdir(".git");
    let stub = git_state(true, true, true, true);

    let verdict = evaluate(&scratch.root, Mode::Marketplace, &stub);

    assert_eq!(verdict.outcome(), Outcome::Admitted);
    assert_eq!(verdict.outcome().exit_code(), 0);
    assert_eq!(codes(&verdict), vec![FindingCode::RepoAdmitted]);
}

#[rstest]
fn marketplace_remote_without_upstream_is_refused(scratch: Scratch) {
    scratch.compliant(Mode::Marketplace).mkdir(".git");
    let stub = git_state(false, true, true, false);

    let verdict = evaluate(&scratch.root, Mode::Marketplace, &stub);

    assert_eq!(
        codes(&verdict),
        vec![FindingCode::MarketplaceContractViolation]
    );
    let details = verdict.findings().first().and_then(|f| f.details.clone());
    let details = details.expect("upstream finding carries details");
    assert_eq!(details.get("hasRemote"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(
        details.get("hasUpstream"),
        Some(&serde_json::Value::Bool(false))
    );
}

#[rstest]
fn repo_mode_does_not_require_upstream(scratch: Scratch) {
    scratch.compliant(Mode::Repo).mkdir(".git");
    let stub = git_state(false, true, true, false);

    let verdict = evaluate(&scratch.root, Mode::Repo, &stub);

    assert_eq!(verdict.outcome(), Outcome::Admitted);
}

#[rstest]
fn unavailable_git_degrades_to_absent(scratch: Scratch) {
    scratch.compliant(Mode::Repo).mkdir(".git");
    let stub = StubExecutor::new(vec![
        ExpectedCall::git_missing(&["tag"]),
        ExpectedCall::git_missing(&["remote"]),
        ExpectedCall::git_missing(HEAD),
        ExpectedCall::git_missing(UPSTREAM),
    ]);

    let verdict = evaluate(&scratch.root, Mode::Repo, &stub);

    assert_eq!(verdict.outcome(), Outcome::Admitted);
    assert!(stub.is_finished());
}

#[rstest]
fn root_that_is_a_file_is_an_error(scratch: Scratch) {
    scratch.touch("not-a-dir");
    let root = scratch.root.join("not-a-dir");
    let stub = StubExecutor::new(Vec::new());

    let verdict = evaluate(&root, Mode::Marketplace, &stub);

    assert_eq!(verdict.outcome(), Outcome::Error);
    assert_eq!(verdict.outcome().exit_code(), 2);
    assert_eq!(codes(&verdict), vec![FindingCode::CheckFailed]);
    let details = verdict.findings().first().and_then(|f| f.details.clone());
    assert_eq!(
        details.and_then(|d| d.get("root").cloned()),
        Some(serde_json::Value::String(root.to_string()))
    );
}

#[rstest]
fn missing_root_is_an_error(scratch: Scratch) {
    let stub = StubExecutor::new(Vec::new());
    let verdict = evaluate(&scratch.root.join("absent"), Mode::Repo, &stub);
    assert_eq!(verdict.outcome(), Outcome::Error);
    assert_eq!(verdict.findings().len(), 1);
}

#[rstest]
fn evaluation_is_repeatable(scratch: Scratch) {
    scratch.touch("README.md").touch(".env").mkdir(".git");

    let first = evaluate(&scratch.root, Mode::Marketplace, &git_state(true, false, true, false));
    let second = evaluate(&scratch.root, Mode::Marketplace, &git_state(true, false, true, false));

    assert_eq!(first, second);
}

#[test]
fn outcome_is_admitted_exactly_when_no_violation_fires() {
    let facts = [GitFact::Present, GitFact::Absent, GitFact::Unavailable];
    for mode in [Mode::Repo, Mode::Marketplace] {
        for tags in facts {
            for remote in facts {
                for commits in facts {
                    for upstream in facts {
                        let snapshot = GitSnapshot {
                            tags,
                            remote,
                            commits,
                            upstream,
                        };
                        let violations = release_sequence_findings(mode, &snapshot);
                        let fired = !violations.is_empty();
                        let verdict = Verdict::from_violations(violations);

                        assert_eq!(verdict.outcome() == Outcome::Admitted, !fired);
                        assert_eq!(
                            verdict.findings().iter().any(|f| f.code.is_violation()),
                            fired,
                            "{mode} {snapshot:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn admitted_verdict_holds_only_the_marker() {
    let verdict = Verdict::from_violations(Vec::new());
    let (outcome, findings) = verdict.into_parts();
    assert_eq!(outcome, Outcome::Admitted);
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings.first().map(|f| f.code),
        Some(FindingCode::RepoAdmitted)
    );
}

#[rstest]
#[case(Outcome::Admitted, "\"ADMITTED\"")]
#[case(Outcome::Refused, "\"REFUSED\"")]
#[case(Outcome::Error, "\"ERROR\"")]
fn outcome_serializes_uppercase(#[case] outcome: Outcome, #[case] json: &str) {
    assert_eq!(
        serde_json::to_string(&outcome).expect("serialize outcome"),
        json
    );
}
