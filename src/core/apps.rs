//! core::apps
//!
//! Inventory of apps installed in the apps directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::resolve::resolve;

/// How an app entry is materialized on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppKind {
    /// A real directory.
    Directory,
    /// A symlink, with the location it resolves to.
    Symlink { target: PathBuf },
    /// Anything else (a stray file).
    File,
}

/// One entry of the apps directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledApp {
    /// Directory entry name.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// What the entry is.
    #[serde(flatten)]
    pub kind: AppKind,
}

impl InstalledApp {
    /// Inspect a single entry without following it.
    pub fn inspect(path: &Path) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let kind = if metadata.file_type().is_symlink() {
            AppKind::Symlink {
                target: resolve(path),
            }
        } else if metadata.is_dir() {
            AppKind::Directory
        } else {
            AppKind::File
        };

        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            kind,
        })
    }

    /// Whether the entry is (or points to) a directory that could hold a checkout.
    pub fn is_dir_like(&self) -> bool {
        match &self.kind {
            AppKind::Directory => true,
            AppKind::Symlink { target } => target.is_dir(),
            AppKind::File => false,
        }
    }
}

/// List the apps in `apps_root`, sorted by name.
///
/// Hidden entries are skipped. A missing apps directory is empty.
///
/// # Errors
///
/// Returns an I/O error if the directory exists but cannot be read.
pub fn list_installed(apps_root: &Path) -> io::Result<Vec<InstalledApp>> {
    let entries = match fs::read_dir(apps_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut apps = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        apps.push(InstalledApp::inspect(&entry.path())?);
    }
    apps.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(apps)
}

/// Find one installed app by name.
pub fn find_installed(apps_root: &Path, name: &str) -> io::Result<Option<InstalledApp>> {
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Ok(None);
    }
    match InstalledApp::inspect(&apps_root.join(name)) {
        Ok(app) => Ok(Some(app)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_installed(&temp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn lists_sorted_and_skips_hidden() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        let apps = root.join("apps");
        fs::create_dir_all(apps.join("zz-app")).unwrap();
        fs::create_dir_all(apps.join(".cache")).unwrap();
        fs::create_dir_all(root.join("system-home")).unwrap();
        symlink(root.join("system-home"), apps.join("home")).unwrap();
        fs::write(apps.join("notes.txt"), "x").unwrap();

        let listed = list_installed(&apps).unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["home", "notes.txt", "zz-app"]);

        assert_eq!(
            listed[0].kind,
            AppKind::Symlink {
                target: root.join("system-home")
            }
        );
        assert_eq!(listed[1].kind, AppKind::File);
        assert_eq!(listed[2].kind, AppKind::Directory);
        assert!(listed[0].is_dir_like());
        assert!(!listed[1].is_dir_like());
    }

    #[test]
    fn find_by_name() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("my-app")).unwrap();

        assert!(find_installed(temp.path(), "my-app").unwrap().is_some());
        assert!(find_installed(temp.path(), "other").unwrap().is_none());
        assert!(find_installed(temp.path(), "../escape").unwrap().is_none());
    }
}
