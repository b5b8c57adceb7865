//! core::paths
//!
//! Centralized path table for the AiiDAlab environment.
//!
//! # Architecture
//!
//! Every location the tool inspects or mutates is computed here, once per
//! invocation, from a handful of roots. Operations receive an
//! [`EnvPaths`] by reference; no code outside this module should join
//! `aiidalab`/`aiidalab-home`/`home` onto a root by hand.
//!
//! # Layout
//!
//! ```text
//! <apps>/home                         -> mode-determining slot
//! /opt/aiidalab-home                  system install of the home app
//! <prefix>/aiidalab                   clone of the aiidalab package
//! <prefix>/aiidalab/aiidalab          its Python package directory
//! <prefix>/aiidalab-home              clone of the home app
//! <prefix>/aiidalab-home/aiidalab     -> link to the package directory
//! ~/aiidalab.toml                     per-user config (`develop` flag)
//! ```
//!
//! # Example
//!
//! ```
//! use aiidalab_develop::core::paths::EnvPaths;
//! use std::path::PathBuf;
//!
//! let paths = EnvPaths::new(
//!     PathBuf::from("/home/jovyan/apps"),
//!     PathBuf::from("/home/jovyan/local"),
//!     PathBuf::from("/opt/aiidalab-home"),
//!     PathBuf::from("/home/jovyan/aiidalab.toml"),
//! );
//!
//! assert_eq!(paths.home_app_user, PathBuf::from("/home/jovyan/apps/home"));
//! assert_eq!(
//!     paths.dev_home_link_slot,
//!     PathBuf::from("/home/jovyan/local/aiidalab-home/aiidalab")
//! );
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::config::ConfigError;
use super::resolve::{absolute, resolve};
use super::types::DevRepo;

/// Default location of the system-installed home app.
pub const DEFAULT_SYSTEM_HOME_APP: &str = "/opt/aiidalab-home";

/// Default root for development checkouts.
pub const DEFAULT_LOCAL_PREFIX: &str = "~/local";

/// Default apps directory when neither flag nor `AIIDALAB_APPS` is set.
pub const DEFAULT_APPS_PATH: &str = "~/apps";

/// Default per-user configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "~/aiidalab.toml";

/// Environment variable AiiDAlab itself uses for the apps directory.
pub const AIIDALAB_APPS_ENV: &str = "AIIDALAB_APPS";

/// Name of the mode-determining slot inside the apps directory.
const HOME_APP_NAME: &str = "home";

/// The computed path table.
///
/// # Invariants
///
/// - Built once per invocation and never mutated
/// - `home_app_user` is always `apps_root/home`
/// - Dev locations are always under `local_prefix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvPaths {
    /// External apps directory.
    pub apps_root: PathBuf,
    /// Root for local development checkouts.
    pub local_prefix: PathBuf,
    /// System install of the home app.
    pub home_app_system: PathBuf,
    /// The user-facing home app slot (`apps_root/home`).
    pub home_app_user: PathBuf,
    /// Checkout of the `aiidalab` package.
    pub dev_package_dir: PathBuf,
    /// Python package directory inside the checkout.
    pub dev_package_subdir: PathBuf,
    /// Checkout of the home app.
    pub dev_home_dir: PathBuf,
    /// Link slot inside the home app checkout pointing at the package.
    pub dev_home_link_slot: PathBuf,
    /// Per-user configuration file.
    pub config_file: PathBuf,
}

impl EnvPaths {
    /// Compute the path table from already-expanded roots.
    pub fn new(
        apps_root: PathBuf,
        local_prefix: PathBuf,
        home_app_system: PathBuf,
        config_file: PathBuf,
    ) -> Self {
        let home_app_user = apps_root.join(HOME_APP_NAME);
        let dev_package_dir = local_prefix.join(DevRepo::Package.name());
        let dev_package_subdir = dev_package_dir.join("aiidalab");
        let dev_home_dir = local_prefix.join(DevRepo::Home.name());
        let dev_home_link_slot = dev_home_dir.join("aiidalab");

        Self {
            apps_root,
            local_prefix,
            home_app_system,
            home_app_user,
            dev_package_dir,
            dev_package_subdir,
            dev_home_dir,
            dev_home_link_slot,
            config_file,
        }
    }

    /// Compute the path table from user-supplied roots.
    ///
    /// Missing roots fall back to their defaults, `~` is expanded, relative
    /// roots are anchored at the current directory, and the apps directory
    /// is resolved.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if a `~` path needs expanding and the
    /// home directory cannot be determined.
    pub fn from_roots(roots: &PathRoots) -> Result<Self, ConfigError> {
        let apps = match &roots.apps_path {
            Some(path) => path.clone(),
            None => std::env::var_os(AIIDALAB_APPS_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_APPS_PATH)),
        };
        let local_prefix = roots
            .local_prefix
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_PREFIX));
        let system = roots
            .system_home_app
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_HOME_APP));
        let config_file = roots
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        // Roots end up as link text; link text must be absolute.
        Ok(Self::new(
            resolve(&expand_tilde(&apps)?),
            absolute(&expand_tilde(&local_prefix)?),
            absolute(&expand_tilde(&system)?),
            absolute(&expand_tilde(&config_file)?),
        ))
    }

    /// Clone destination for a development repository.
    pub fn checkout_dir(&self, repo: DevRepo) -> &Path {
        match repo {
            DevRepo::Package => &self.dev_package_dir,
            DevRepo::Home => &self.dev_home_dir,
        }
    }
}

/// Roots as given on the command line (or via environment overrides).
#[derive(Debug, Clone, Default)]
pub struct PathRoots {
    /// Apps directory; falls back to `$AIIDALAB_APPS`, then `~/apps`.
    pub apps_path: Option<PathBuf>,
    /// Development prefix; defaults to `~/local`.
    pub local_prefix: Option<PathBuf>,
    /// System home app; defaults to `/opt/aiidalab-home`.
    pub system_home_app: Option<PathBuf>,
    /// Config file; defaults to `~/aiidalab.toml`.
    pub config_file: Option<PathBuf>,
}

/// Expand a leading `~` to the user's home directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` when expansion is needed but the home
/// directory is unknown.
pub fn expand_tilde(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut components = path.components();
    match components.next() {
        Some(std::path::Component::Normal(first)) if first == "~" => {
            let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnvPaths {
        EnvPaths::new(
            PathBuf::from("/apps"),
            PathBuf::from("/prefix"),
            PathBuf::from("/opt/aiidalab-home"),
            PathBuf::from("/home/u/aiidalab.toml"),
        )
    }

    #[test]
    fn derives_all_locations() {
        let paths = sample();

        assert_eq!(paths.home_app_user, PathBuf::from("/apps/home"));
        assert_eq!(paths.dev_package_dir, PathBuf::from("/prefix/aiidalab"));
        assert_eq!(
            paths.dev_package_subdir,
            PathBuf::from("/prefix/aiidalab/aiidalab")
        );
        assert_eq!(paths.dev_home_dir, PathBuf::from("/prefix/aiidalab-home"));
        assert_eq!(
            paths.dev_home_link_slot,
            PathBuf::from("/prefix/aiidalab-home/aiidalab")
        );
    }

    #[test]
    fn checkout_dirs() {
        let paths = sample();
        assert_eq!(
            paths.checkout_dir(DevRepo::Package),
            Path::new("/prefix/aiidalab")
        );
        assert_eq!(
            paths.checkout_dir(DevRepo::Home),
            Path::new("/prefix/aiidalab-home")
        );
    }

    #[test]
    fn relative_roots_become_absolute() {
        let roots = PathRoots {
            apps_path: Some(PathBuf::from("/apps")),
            local_prefix: Some(PathBuf::from("local")),
            system_home_app: Some(PathBuf::from("opt/aiidalab-home")),
            config_file: Some(PathBuf::from("aiidalab.toml")),
        };
        let cwd = std::env::current_dir().unwrap();

        let paths = EnvPaths::from_roots(&roots).unwrap();

        assert_eq!(paths.local_prefix, cwd.join("local"));
        assert_eq!(paths.dev_home_dir, cwd.join("local/aiidalab-home"));
        assert_eq!(paths.home_app_system, cwd.join("opt/aiidalab-home"));
        assert_eq!(paths.config_file, cwd.join("aiidalab.toml"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_tilde(Path::new("~/local")).unwrap(),
            home.join("local")
        );
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
    }

    #[test]
    fn tilde_only_expands_leading_component() {
        assert_eq!(
            expand_tilde(Path::new("/srv/~/x")).unwrap(),
            PathBuf::from("/srv/~/x")
        );
        assert_eq!(
            expand_tilde(Path::new("~user/x")).unwrap(),
            PathBuf::from("~user/x")
        );
    }

    #[test]
    fn from_roots_uses_explicit_values() {
        let temp = tempfile::TempDir::new().unwrap();
        let apps = std::fs::canonicalize(temp.path()).unwrap();

        let roots = PathRoots {
            apps_path: Some(apps.clone()),
            local_prefix: Some(PathBuf::from("/prefix")),
            system_home_app: Some(PathBuf::from("/srv/home")),
            config_file: Some(PathBuf::from("/etc/aiidalab.toml")),
        };
        let paths = EnvPaths::from_roots(&roots).unwrap();

        assert_eq!(paths.apps_root, apps);
        assert_eq!(paths.local_prefix, PathBuf::from("/prefix"));
        assert_eq!(paths.home_app_system, PathBuf::from("/srv/home"));
        assert_eq!(paths.config_file, PathBuf::from("/etc/aiidalab.toml"));
    }
}
