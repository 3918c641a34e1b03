//! Read-only filesystem checks relative to a checked root.
//!
//! Absence is a normal answer here, never an error: every stat failure
//! (missing entry, permission denied, dangling symlink) reads as "not
//! present".

use camino::Utf8Path;
use log::trace;

/// Returns true when `relative` exists under `root`, as a file or directory.
///
/// Symlinks are followed, so a dangling link reports `false`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use wfsl_repo_guard::fs_probe::exists;
///
/// assert!(!exists(Utf8Path::new("/definitely/not/here"), "README.md"));
/// ```
#[must_use]
pub fn exists(root: &Utf8Path, relative: &str) -> bool {
    root.join(relative).as_std_path().exists()
}

/// Returns true when `path` names an existing directory.
#[must_use]
pub fn is_directory(path: &Utf8Path) -> bool {
    path.as_std_path().is_dir()
}

/// Returns the entries of `forbidden` that exist under `root`.
///
/// Input order is preserved. Files and directories match alike.
#[must_use]
pub fn find_forbidden(root: &Utf8Path, forbidden: &[&str]) -> Vec<String> {
    let hits: Vec<String> = forbidden
        .iter()
        .filter(|entry| exists(root, entry))
        .map(|entry| (*entry).to_owned())
        .collect();
    trace!("forbidden paths present under {root}: {hits:?}");
    hits
}

/// Returns the entries of `required` that do not exist under `root`.
///
/// Input order is preserved.
#[must_use]
pub fn find_missing(root: &Utf8Path, required: &[&str]) -> Vec<String> {
    let missing: Vec<String> = required
        .iter()
        .filter(|entry| !exists(root, entry))
        .map(|entry| (*entry).to_owned())
        .collect();
    trace!("required paths missing under {root}: {missing:?}");
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Scratch {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn scratch() -> Scratch {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp path");
        Scratch { _dir: dir, root }
    }

    #[rstest]
    fn exists_reports_files_and_directories(scratch: Scratch) {
        fs::write(scratch.root.join("README.md"), "# readme").expect("write readme");
        fs::create_dir(scratch.root.join("node_modules")).expect("create dir");

        assert!(exists(&scratch.root, "README.md"));
        assert!(exists(&scratch.root, "node_modules"));
        assert!(!exists(&scratch.root, "LICENSE"));
    }

    #[rstest]
    fn exists_accepts_nested_relative_paths(scratch: Scratch) {
        fs::create_dir_all(scratch.root.join(".github/workflows")).expect("create nested");
        assert!(exists(&scratch.root, ".github/workflows"));
        assert!(!exists(&scratch.root, ".github/actions"));
    }

    #[rstest]
    fn is_directory_rejects_files(scratch: Scratch) {
        let file = scratch.root.join("LICENSE");
        fs::write(&file, "ISC").expect("write license");

        assert!(is_directory(&scratch.root));
        assert!(!is_directory(&file));
        assert!(!is_directory(&scratch.root.join("absent")));
    }

    #[rstest]
    fn find_forbidden_preserves_input_order(scratch: Scratch) {
        fs::write(scratch.root.join(".env.local"), "KEY=1").expect("write env");
        fs::create_dir(scratch.root.join("node_modules")).expect("create dir");

        let hits = find_forbidden(&scratch.root, &[".env.local", ".next", "node_modules"]);
        assert_eq!(hits, vec![".env.local".to_owned(), "node_modules".to_owned()]);
    }

    #[rstest]
    fn find_missing_preserves_input_order(scratch: Scratch) {
        fs::write(scratch.root.join("README.md"), "# readme").expect("write readme");

        let missing = find_missing(&scratch.root, &[".gitignore", "README.md", "LICENSE"]);
        assert_eq!(missing, vec![".gitignore".to_owned(), "LICENSE".to_owned()]);
    }

    #[rstest]
    fn nonexistent_root_reports_everything_missing(scratch: Scratch) {
        let gone = scratch.root.join("gone");
        assert!(find_forbidden(&gone, &["node_modules"]).is_empty());
        assert_eq!(find_missing(&gone, &["LICENSE"]), vec!["LICENSE".to_owned()]);
    }

    #[cfg(unix)]
    #[rstest]
    fn dangling_symlink_counts_as_absent(scratch: Scratch) {
        std::os::unix::fs::symlink(scratch.root.join("nowhere"), scratch.root.join(".env"))
            .expect("create symlink");
        assert!(!exists(&scratch.root, ".env"));
    }
}
