//! Root path resolution.
//!
//! The working directory is captured once by the binary and passed in, so
//! nothing below the CLI consults process state.

use crate::error::{GuardError, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// Converts an OS path into a UTF-8 path.
///
/// # Errors
///
/// Returns [`GuardError::NonUtf8Path`] if the path is not valid UTF-8.
pub fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|err| GuardError::NonUtf8Path {
        reason: err.to_string(),
    })
}

/// Returns the process working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns [`GuardError::CurrentDir`] if the directory cannot be read, or
/// [`GuardError::NonUtf8Path`] if it is not valid UTF-8.
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().map_err(|source| GuardError::CurrentDir { source })?;
    to_utf8(cwd)
}

/// Resolves `root` against `cwd` and normalises it lexically.
///
/// `.` segments are dropped and `..` pops the previous segment. Symlinks
/// are not consulted, and `..` never climbs above the filesystem root.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use wfsl_repo_guard::paths::resolve_root;
///
/// let cwd = Utf8Path::new("/work/project");
/// assert_eq!(resolve_root(cwd, Utf8Path::new(".")), Utf8Path::new("/work/project"));
/// assert_eq!(resolve_root(cwd, Utf8Path::new("../other/./x")), Utf8Path::new("/work/other/x"));
/// assert_eq!(resolve_root(cwd, Utf8Path::new("/srv/repo")), Utf8Path::new("/srv/repo"));
/// ```
#[must_use]
pub fn resolve_root(cwd: &Utf8Path, root: &Utf8Path) -> Utf8PathBuf {
    let joined = cwd.join(root);
    let mut resolved = Utf8PathBuf::new();
    for component in joined.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if resolved.parent().is_some() {
                    resolved.pop();
                }
            }
            other => resolved.push(other.as_str()),
        }
    }
    resolved
}
