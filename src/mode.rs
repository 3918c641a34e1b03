//! Check postures and the static rule sets they select.
//!
//! A [`Mode`] is fixed for one invocation. It chooses the required-file
//! list, the forbidden-path list, and whether the stricter marketplace git
//! rules apply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paths that must never be present in an admitted repository.
///
/// Build output directories such as `dist` are deliberately absent: a
/// marketplace action ships its compiled bundle.
const FORBIDDEN_PATHS: &[&str] = &[
    "node_modules",
    ".next",
    ".env",
    ".env.local",
    ".env.production",
    ".env.development",
];

const REPO_REQUIRED: &[&str] = &[".gitignore", "README.md", "LICENSE"];

const MARKETPLACE_REQUIRED: &[&str] = &[".gitignore", "README.md", "LICENSE", "action.yml"];

/// The posture a check runs under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generic repository hygiene check.
    #[default]
    Repo,
    /// Stricter check for publishable packages.
    Marketplace,
}

/// Result of coercing a raw mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelection {
    /// The mode that will be used.
    pub mode: Mode,
    /// True when the raw value was present but unrecognised and `repo` was
    /// substituted.
    pub fell_back: bool,
}

impl Mode {
    /// Coerces a raw, possibly absent mode string.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything other than `repo` or `marketplace` selects [`Mode::Repo`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::mode::Mode;
    ///
    /// assert_eq!(Mode::coerce(Some("Marketplace")).mode, Mode::Marketplace);
    /// assert_eq!(Mode::coerce(None).mode, Mode::Repo);
    ///
    /// let fallback = Mode::coerce(Some("strict"));
    /// assert_eq!(fallback.mode, Mode::Repo);
    /// assert!(fallback.fell_back);
    /// ```
    #[must_use]
    pub fn coerce(raw: Option<&str>) -> ModeSelection {
        let Some(value) = raw else {
            return ModeSelection {
                mode: Self::Repo,
                fell_back: false,
            };
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "repo" => ModeSelection {
                mode: Self::Repo,
                fell_back: false,
            },
            "marketplace" => ModeSelection {
                mode: Self::Marketplace,
                fell_back: false,
            },
            _ => ModeSelection {
                mode: Self::Repo,
                fell_back: true,
            },
        }
    }

    /// Returns the lowercase wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repo => "repo",
            Self::Marketplace => "marketplace",
        }
    }

    /// Returns the static rule set for this mode.
    #[must_use]
    pub const fn rule_set(self) -> RuleSet {
        match self {
            Self::Repo => RuleSet {
                required: REPO_REQUIRED,
                forbidden: FORBIDDEN_PATHS,
            },
            Self::Marketplace => RuleSet {
                required: MARKETPLACE_REQUIRED,
                forbidden: FORBIDDEN_PATHS,
            },
        }
    }

    /// Returns true when the marketplace git contract applies.
    #[must_use]
    pub const fn is_marketplace(self) -> bool {
        matches!(self, Self::Marketplace)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required and forbidden paths, relative to the checked root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    required: &'static [&'static str],
    forbidden: &'static [&'static str],
}

impl RuleSet {
    /// Paths that must exist, in evaluation order.
    #[must_use]
    pub const fn required(&self) -> &'static [&'static str] {
        self.required
    }

    /// Paths that must not exist, in evaluation order.
    #[must_use]
    pub const fn forbidden(&self) -> &'static [&'static str] {
        self.forbidden
    }
}
