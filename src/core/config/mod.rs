//! core::config
//!
//! The per-user AiiDAlab configuration document.
//!
//! # Overview
//!
//! AiiDAlab reads `~/aiidalab.toml` and honors a boolean `develop` key.
//! This tool only ever changes that one key; every other key in the file
//! belongs to someone else and must survive a rewrite unchanged, in its
//! original order.
//!
//! # Missing File
//!
//! A missing file is never an error. [`AiidalabConfig::load`] returns
//! `None` and callers decide whether that means "nothing to update" or
//! "start from an empty document".
//!
//! # Example
//!
//! ```no_run
//! use aiidalab_develop::core::config::AiidalabConfig;
//! use std::path::Path;
//!
//! let path = Path::new("/home/jovyan/aiidalab.toml");
//! let mut config = AiidalabConfig::load_or_default(path).unwrap();
//! config.set_develop(true);
//! config.save(path).unwrap();
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};

use super::resolve::resolve;

/// Key toggled by `setup` and `restore`.
pub const DEVELOP_KEY: &str = "develop";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// A round-trippable view of `aiidalab.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiidalabConfig {
    table: Table,
}

impl AiidalabConfig {
    /// Parse a document from a string.
    ///
    /// `path` is only used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { table })
    }

    /// Load the document at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        Self::parse(&contents, path).map(Some)
    }

    /// Load the document at `path`, or an empty one if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    /// Whether development mode is requested.
    ///
    /// Only a literal `true` counts; absence or any other value is `false`.
    pub fn develop(&self) -> bool {
        matches!(self.table.get(DEVELOP_KEY), Some(Value::Boolean(true)))
    }

    /// Set the `develop` key, leaving every other key alone.
    pub fn set_develop(&mut self, develop: bool) {
        self.table
            .insert(DEVELOP_KEY.to_string(), Value::Boolean(develop));
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Top-level entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Serialize the document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(&self.table).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Write the document to `path` atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption. If `path`
    /// is a symlink, the file it points to is rewritten and the link stays.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        if is_symlink(path) {
            write_atomic(&resolve(path), &contents)
        } else {
            write_atomic(path, &contents)
        }
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Write a file atomically.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("aiidalab.toml");

        assert!(AiidalabConfig::load(&path).unwrap().is_none());
        assert!(AiidalabConfig::load_or_default(&path).unwrap().is_empty());
    }

    #[test]
    fn develop_defaults_to_false() {
        let config = AiidalabConfig::default();
        assert!(!config.develop());
    }

    #[test]
    fn develop_requires_literal_true() {
        let path = Path::new("aiidalab.toml");
        let config = AiidalabConfig::parse("develop = \"yes\"", path).unwrap();
        assert!(!config.develop());

        let config = AiidalabConfig::parse("develop = true", path).unwrap();
        assert!(config.develop());
    }

    #[test]
    fn set_develop_preserves_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("aiidalab.toml");
        fs::write(
            &path,
            "registry = \"https://example.com/registry\"\ndevelop = false\n\n[apps]\nhidden = [\"a\", \"b\"]\n",
        )
        .unwrap();

        let mut config = AiidalabConfig::load(&path).unwrap().unwrap();
        config.set_develop(true);
        config.save(&path).unwrap();

        let reloaded = AiidalabConfig::load(&path).unwrap().unwrap();
        assert!(reloaded.develop());
        assert_eq!(
            reloaded.get("registry").and_then(Value::as_str),
            Some("https://example.com/registry")
        );
        let hidden = reloaded
            .get("apps")
            .and_then(Value::as_table)
            .and_then(|apps| apps.get("hidden"))
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(hidden.len(), 2);
    }

    #[test]
    fn key_order_is_preserved() {
        let path = Path::new("aiidalab.toml");
        let mut config = AiidalabConfig::parse("zeta = 1\nalpha = 2\n", path).unwrap();
        config.set_develop(false);

        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "develop"]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/aiidalab.toml");

        let mut config = AiidalabConfig::default();
        config.set_develop(true);
        config.save(&path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_writes_through_symlink() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        let dotfile = root.join("dotfiles/aiidalab.toml");
        fs::create_dir_all(dotfile.parent().unwrap()).unwrap();
        fs::write(&dotfile, "theme = \"dark\"\n").unwrap();
        let link = root.join("aiidalab.toml");
        std::os::unix::fs::symlink(&dotfile, &link).unwrap();

        let mut config = AiidalabConfig::load(&link).unwrap().unwrap();
        config.set_develop(true);
        config.save(&link).unwrap();

        assert!(fs::symlink_metadata(&link)
            .unwrap()
            .file_type()
            .is_symlink());
        let written = AiidalabConfig::load(&dotfile).unwrap().unwrap();
        assert!(written.develop());
        assert_eq!(written.get("theme").and_then(Value::as_str), Some("dark"));
    }

    #[test]
    fn parse_error_names_path() {
        let err = AiidalabConfig::parse("develop = ", Path::new("/x/aiidalab.toml")).unwrap_err();
        assert!(err.to_string().contains("/x/aiidalab.toml"));
    }
}
