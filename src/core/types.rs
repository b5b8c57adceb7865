//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`GithubUsername`] - Validated GitHub login used to build clone URLs
//! - [`CloneProtocol`] - SSH or HTTPS transport for clone URLs
//! - [`DevRepo`] - The two repositories a development environment needs
//!
//! # Validation
//!
//! These types enforce validity at construction time. A username that
//! cannot exist on GitHub never reaches the `git clone` subprocess.
//!
//! # Examples
//!
//! ```
//! use aiidalab_develop::core::types::{CloneProtocol, DevRepo, GithubUsername};
//!
//! let user = GithubUsername::new("aiidalab").unwrap();
//! assert_eq!(
//!     DevRepo::Package.clone_url(&user, CloneProtocol::Https),
//!     "https://github.com/aiidalab/aiidalab.git"
//! );
//!
//! assert!(GithubUsername::new("-leading-hyphen").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid GitHub username '{name}': {reason}")]
    InvalidGithubUsername { name: String, reason: String },
}

/// Longest login GitHub accepts.
const MAX_USERNAME_LEN: usize = 39;

/// A validated GitHub username (user or organization login).
///
/// GitHub logins:
/// - Are 1 to 39 characters long
/// - Contain only ASCII alphanumerics and hyphens
/// - Cannot start or end with a hyphen
/// - Cannot contain consecutive hyphens
///
/// # Example
///
/// ```
/// use aiidalab_develop::core::types::GithubUsername;
///
/// let user = GithubUsername::new("some-user42").unwrap();
/// assert_eq!(user.as_str(), "some-user42");
///
/// assert!(GithubUsername::new("").is_err());
/// assert!(GithubUsername::new("double--hyphen").is_err());
/// assert!(GithubUsername::new("with/slash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GithubUsername(String);

impl GithubUsername {
    /// Create a new validated username.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidGithubUsername` if the login is malformed.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let invalid = |reason: &str| TypeError::InvalidGithubUsername {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("username cannot be empty"));
        }
        if name.len() > MAX_USERNAME_LEN {
            return Err(invalid("username cannot be longer than 39 characters"));
        }
        if name.starts_with('-') || name.ends_with('-') {
            return Err(invalid("username cannot start or end with '-'"));
        }
        if name.contains("--") {
            return Err(invalid("username cannot contain consecutive hyphens"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(invalid(&format!("username cannot contain '{}'", c)));
        }

        Ok(())
    }

    /// Get the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GithubUsername {
    /// The upstream organization.
    fn default() -> Self {
        Self("aiidalab".to_string())
    }
}

impl fmt::Display for GithubUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GithubUsername {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GithubUsername> for String {
    fn from(user: GithubUsername) -> Self {
        user.0
    }
}

impl std::str::FromStr for GithubUsername {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Transport used for clone URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneProtocol {
    /// `https://github.com/{user}/{repo}.git`
    #[default]
    Https,
    /// `git@github.com:{user}/{repo}.git`
    Ssh,
}

impl CloneProtocol {
    /// Pick the protocol from the `--use-ssh` flag.
    pub fn from_use_ssh(use_ssh: bool) -> Self {
        if use_ssh {
            CloneProtocol::Ssh
        } else {
            CloneProtocol::Https
        }
    }
}

/// A repository that makes up the development environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevRepo {
    /// The `aiidalab` Python package.
    Package,
    /// The `aiidalab-home` app.
    Home,
}

impl DevRepo {
    /// Repository name on GitHub.
    pub fn name(&self) -> &'static str {
        match self {
            DevRepo::Package => "aiidalab",
            DevRepo::Home => "aiidalab-home",
        }
    }

    /// Clone URL for this repository under `user`.
    pub fn clone_url(&self, user: &GithubUsername, protocol: CloneProtocol) -> String {
        match protocol {
            CloneProtocol::Ssh => format!("git@github.com:{}/{}.git", user, self.name()),
            CloneProtocol::Https => format!("https://github.com/{}/{}.git", user, self.name()),
        }
    }
}
