//! engine::errors
//!
//! Errors raised while reconciling the environment.
//!
//! Every conflicting-state variant names the exact path involved and, where
//! there is one, where it actually points.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::git::GitError;

/// Errors from the engine operations.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The system install of the home app is missing.
    #[error("system home app '{path}' does not exist")]
    SystemHomeAppMissing { path: PathBuf },

    /// A managed link points somewhere the tool does not recognize.
    #[error("link {link} exists and points to unexpected location {found}")]
    UnexpectedLinkTarget { link: PathBuf, found: PathBuf },

    /// A managed slot is occupied by something that is not a symlink.
    #[error("{path} exists and is not expected symbolic link")]
    NotASymlink { path: PathBuf },

    /// The home app slot is a real directory.
    #[error("unable to set up home app for development, existing directory at {path}")]
    ExistingDirectory { path: PathBuf },

    /// The package link inside the home app checkout is taken.
    #[error("link {link} already exists and points to unknown location {found}")]
    LinkSlotOccupied { link: PathBuf, found: PathBuf },

    /// No app of that name in the apps directory.
    #[error("app '{name}' is not installed in {apps_root}")]
    AppNotInstalled { name: String, apps_root: PathBuf },

    /// Filesystem failure on a specific path.
    #[error("filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl EnvError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> EnvError + '_ {
        move |source| EnvError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
