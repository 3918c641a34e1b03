//! Optional guard configuration.
//!
//! A `repo-guard.toml` file mirrors the declared v1 shape: a schema
//! identifier, a version string, the `deny` posture, and per-mode defaults.
//! The v1 rule set is fixed, so `mode_defaults` is validated and reported
//! but never applied to an evaluation.

use crate::error::{GuardError, Result};
use crate::evidence::SCHEMA_ID;
use crate::mode::Mode;
use camino::Utf8Path;
use serde::Deserialize;
use std::fs;

/// Enforcement posture. Only denial is defined for v1.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Posture {
    /// Violations refuse admission.
    #[default]
    Deny,
}

/// Top-level guard configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Schema identifier; must equal `wfsl.repo-guard.v1`.
    pub schema: String,
    /// Free-form configuration version.
    pub version: String,
    /// Enforcement posture.
    pub posture: Posture,
    /// Per-mode overrides, declared but not applied in v1.
    #[serde(default)]
    pub mode_defaults: ModeDefaults,
}

/// Per-mode override tables.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModeDefaults {
    /// Overrides for `repo` mode.
    pub repo: Option<RepoDefaults>,
    /// Overrides for `marketplace` mode.
    pub marketplace: Option<MarketplaceDefaults>,
}

/// Overrides declared for `repo` mode.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoDefaults {
    /// Extra required paths.
    pub require_files: Option<Vec<String>>,
    /// Extra forbidden paths.
    pub forbid_paths: Option<Vec<String>>,
}

/// Overrides declared for `marketplace` mode.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MarketplaceDefaults {
    /// Extra required paths.
    pub require_files: Option<Vec<String>>,
    /// Extra forbidden paths.
    pub forbid_paths: Option<Vec<String>>,
    /// Whether `action.yml` is required.
    pub require_action_yml: Option<bool>,
    /// Whether a release tag is required.
    pub require_tags: Option<bool>,
}

impl GuardConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::ReadConfig`] if the file cannot be read, or
    /// [`GuardError::InvalidConfig`] if it does not parse, has unknown
    /// fields, or names another schema.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| GuardError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &source)
    }

    /// Parses and validates configuration text. `path` is used for errors.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidConfig`] on any parse or schema failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use wfsl_repo_guard::config::GuardConfig;
    ///
    /// let source = "schema = \"wfsl.repo-guard.v1\"\nversion = \"1\"\nposture = \"deny\"\n";
    /// let config = GuardConfig::parse(Utf8Path::new("repo-guard.toml"), source)?;
    /// assert!(!config.declares_overrides());
    /// # Ok::<(), wfsl_repo_guard::error::GuardError>(())
    /// ```
    pub fn parse(path: &Utf8Path, source: &str) -> Result<Self> {
        let invalid = |reason: String| GuardError::InvalidConfig {
            path: path.to_owned(),
            reason,
        };

        let config: Self = toml::from_str(source).map_err(|err| invalid(err.to_string()))?;
        if config.schema != SCHEMA_ID {
            return Err(invalid(format!(
                "schema must be \"{SCHEMA_ID}\", found \"{}\"",
                config.schema
            )));
        }
        Ok(config)
    }

    /// Returns true when any per-mode override is declared.
    #[must_use]
    pub fn declares_overrides(&self) -> bool {
        self.mode_defaults.repo.is_some() || self.mode_defaults.marketplace.is_some()
    }

    /// Returns true when overrides are declared for `mode`.
    #[must_use]
    pub fn declares_overrides_for(&self, mode: Mode) -> bool {
        match mode {
            Mode::Repo => self.mode_defaults.repo.is_some(),
            Mode::Marketplace => self.mode_defaults.marketplace.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "schema = \"wfsl.repo-guard.v1\"\nversion = \"1.0.0\"\nposture = \"deny\"\n";

    fn parse(source: &str) -> Result<GuardConfig> {
        GuardConfig::parse(Utf8Path::new("repo-guard.toml"), source)
    }

    #[rstest]
    fn minimal_config_parses() {
        let config = parse(HEADER).expect("minimal config parses");

        assert_eq!(config.posture, Posture::Deny);
        assert_eq!(config.version, "1.0.0");
        assert!(!config.declares_overrides());
    }

    #[rstest]
    fn mode_defaults_are_read_per_mode() {
        let source = format!(
            "{HEADER}\n[mode_defaults.marketplace]\nrequire_files = [\"action.yml\"]\nrequire_tags = true\n"
        );

        let config = parse(&source).expect("config with marketplace defaults parses");

        assert!(config.declares_overrides_for(Mode::Marketplace));
        assert!(!config.declares_overrides_for(Mode::Repo));
        let marketplace = config.mode_defaults.marketplace.expect("marketplace table");
        assert_eq!(marketplace.require_tags, Some(true));
        assert_eq!(
            marketplace.require_files,
            Some(vec!["action.yml".to_owned()])
        );
    }

    #[rstest]
    #[case::wrong_schema("schema = \"wfsl.repo-guard.v2\"\nversion = \"1\"\nposture = \"deny\"\n")]
    #[case::allow_posture("schema = \"wfsl.repo-guard.v1\"\nversion = \"1\"\nposture = \"allow\"\n")]
    #[case::missing_posture("schema = \"wfsl.repo-guard.v1\"\nversion = \"1\"\n")]
    #[case::unknown_field(
        "schema = \"wfsl.repo-guard.v1\"\nversion = \"1\"\nposture = \"deny\"\nstrict = true\n"
    )]
    #[case::unknown_mode_field(
        "schema = \"wfsl.repo-guard.v1\"\nversion = \"1\"\nposture = \"deny\"\n[mode_defaults.repo]\nrequire_tags = true\n"
    )]
    #[case::not_toml("schema = ")]
    fn invalid_configs_are_rejected(#[case] source: &str) {
        let err = parse(source).expect_err("config should be rejected");
        assert!(matches!(err, GuardError::InvalidConfig { .. }), "got {err}");
    }

    #[rstest]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = camino::Utf8PathBuf::try_from(dir.path().join("absent.toml"))
            .expect("utf-8 path");

        let err = GuardConfig::load(&path).expect_err("missing file should fail");

        assert!(matches!(err, GuardError::ReadConfig { .. }));
    }

    #[rstest]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = camino::Utf8PathBuf::try_from(dir.path().join("repo-guard.toml"))
            .expect("utf-8 path");
        fs::write(&path, HEADER).expect("write config");

        let config = GuardConfig::load(&path).expect("config loads");

        assert_eq!(config.schema, SCHEMA_ID);
    }
}
