//! WFSL repository admission guard.
//!
//! Inspects a repository root against a fixed v1 rule set and produces an
//! evidence record stating whether the repository is admitted, refused, or
//! could not be checked. Rule violations are data, not errors: every
//! applicable rule runs and all findings are reported together.
//!
//! ```
//! use camino::Utf8Path;
//! use wfsl_repo_guard::evidence::{CheckRequest, check};
//! use wfsl_repo_guard::exec::SystemCommandExecutor;
//! use wfsl_repo_guard::mode::Mode;
//! use wfsl_repo_guard::rules::Outcome;
//! use wfsl_repo_guard::timestamp::Timestamp;
//!
//! let request = CheckRequest {
//!     root: Utf8Path::new("/definitely/not/a/repository").to_owned(),
//!     mode: Mode::Marketplace,
//!     timestamp: Timestamp::from_epoch_millis(0),
//! };
//! let evidence = check(&request, &SystemCommandExecutor);
//! assert_eq!(evidence.outcome(), Outcome::Error);
//! assert_eq!(evidence.exit_code(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod evidence;
pub mod exec;
pub mod finding;
pub mod fs_probe;
pub mod git;
pub mod logging;
pub mod mode;
pub mod paths;
pub mod rules;
pub mod sink;
pub mod timestamp;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{GuardError, Result};
pub use evidence::{CheckRequest, Evidence, SCHEMA_ID, check};
pub use finding::{Finding, FindingCode};
pub use mode::Mode;
pub use rules::{Outcome, Verdict, evaluate};
pub use timestamp::Timestamp;
