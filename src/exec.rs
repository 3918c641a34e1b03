//! External command execution.
//!
//! Git queries run through [`CommandExecutor`] so tests can script git
//! state with a stub instead of building real repositories.

use crate::error::{GuardError, Result};
use camino::Utf8Path;
use std::process::{Command, Output, Stdio};

/// Abstraction for running external commands inside a directory.
pub trait CommandExecutor {
    /// Runs `program` with `args` in `dir` and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Spawn`] when the program cannot be started.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use wfsl_repo_guard::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run(Utf8Path::new("."), "git", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), wfsl_repo_guard::error::GuardError>(())
    /// ```
    fn run(&self, dir: &Utf8Path, program: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// Stdin is closed and stdout/stderr are captured. No timeout is applied,
/// so a hung child blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, dir: &Utf8Path, program: &str, args: &[&str]) -> Result<Output> {
        Command::new(program)
            .args(args)
            .current_dir(dir.as_std_path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GuardError::Spawn {
                program: program.to_owned(),
                source,
            })
    }
}
