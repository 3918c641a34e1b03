//! Scripted command execution for tests.

use crate::error::{GuardError, Result};
use crate::exec::CommandExecutor;
use camino::Utf8Path;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code.unsigned_abs())
}

/// Creates a successful `Output` whose stdout is `stdout`.
#[must_use]
pub fn success_output(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed `Output` with the given exit code and stderr message.
#[must_use]
pub fn failure_output(code: i32, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// An expected command invocation and the result to hand back.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The program to execute (e.g. "git").
    pub program: &'static str,
    /// The arguments to pass.
    pub args: Vec<&'static str>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Expects a `git` invocation with `args` that succeeds with `stdout`.
    #[must_use]
    pub fn git_ok(args: &[&'static str], stdout: &str) -> Self {
        Self {
            program: "git",
            args: args.to_vec(),
            result: Ok(success_output(stdout)),
        }
    }

    /// Expects a `git` invocation with `args` that exits with `code`.
    #[must_use]
    pub fn git_fails(args: &[&'static str], code: i32) -> Self {
        Self {
            program: "git",
            args: args.to_vec(),
            result: Ok(failure_output(code, "fatal: scripted failure")),
        }
    }

    /// Expects a `git` invocation with `args` that cannot be spawned.
    #[must_use]
    pub fn git_missing(args: &[&'static str]) -> Self {
        Self {
            program: "git",
            args: args.to_vec(),
            result: Err(GuardError::Spawn {
                program: "git".to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
            }),
        }
    }
}

/// A stub implementation of [`CommandExecutor`] for testing.
///
/// Hands out predefined results in order and reports any invocation that
/// does not match the next expectation as [`GuardError::StubMismatch`].
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    invocations: Cell<usize>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            invocations: Cell::new(0),
        }
    }

    /// Returns true when every expected invocation has been consumed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.expected.borrow().is_empty()
    }

    /// Returns how many invocations were received, matched or not.
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.invocations.get()
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, _dir: &Utf8Path, program: &str, args: &[&str]) -> Result<Output> {
        self.invocations.set(self.invocations.get() + 1);
        let Some(call) = self.expected.borrow_mut().pop_front() else {
            return Err(GuardError::StubMismatch {
                message: format!("unexpected invocation: {program} {}", args.join(" ")),
            });
        };

        if call.program != program || call.args.as_slice() != args {
            return Err(GuardError::StubMismatch {
                message: format!(
                    "expected `{} {}`, got `{program} {}`",
                    call.program,
                    call.args.join(" "),
                    args.join(" ")
                ),
            });
        }

        call.result
    }
}
