//! core::mode
//!
//! Environment mode detection.
//!
//! The mode is never stored. It is recomputed on every invocation from
//! where the home app slot resolves to.

use std::fmt;

use serde::Serialize;

use super::paths::EnvPaths;
use super::resolve::resolve;

/// Which home app the apps directory currently serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// The slot points at the system install.
    System,
    /// The slot points at the local `aiidalab-home` checkout.
    Development,
    /// The slot is missing, a real directory, or points elsewhere.
    Unknown,
}

impl Mode {
    /// Detect the current mode from the filesystem.
    ///
    /// Development wins if the development checkout and the system install
    /// happen to resolve to the same place.
    pub fn detect(paths: &EnvPaths) -> Self {
        let slot = resolve(&paths.home_app_user);
        if slot == resolve(&paths.dev_home_dir) {
            Mode::Development
        } else if slot == resolve(&paths.home_app_system) {
            Mode::System
        } else {
            Mode::Unknown
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::System => write!(f, "SYSTEM"),
            Mode::Development => write!(f, "DEVELOPMENT"),
            Mode::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
