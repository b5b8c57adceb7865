//! git::interface
//!
//! Git access for the development environment.
//!
//! This module provides the **single doorway** to all Git operations. Two
//! things ever happen here: cloning a repository (through the `git` CLI,
//! so the user's credential helpers and SSH agent apply) and reading which
//! branch a checkout is on (through git2, no subprocess needed).
//!
//! # Error Handling
//!
//! Git failures are categorized into typed variants:
//! - [`GitError::Spawn`]: The `git` program could not be started
//! - [`GitError::CloneFailed`]: `git clone` exited non-zero
//! - [`GitError::NotARepo`]: A path is not a Git checkout
//! - [`GitError::Repository`]: git2 failed to read a checkout
//!
//! # Example
//!
//! ```ignore
//! use aiidalab_develop::git::{GitCli, VersionControl};
//! use std::path::Path;
//!
//! let git = GitCli::new();
//! git.clone_repo("https://github.com/aiidalab/aiidalab.git", Path::new("/tmp/aiidalab"))?;
//! println!("{}", git.head(Path::new("/tmp/aiidalab"))?);
//! ```

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// The program that was invoked
        program: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// `git clone` exited with a non-zero status.
    #[error("git clone {url} {destination} failed ({status}): {stderr}")]
    CloneFailed {
        /// The URL being cloned
        url: String,
        /// The clone destination
        destination: PathBuf,
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Path is not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// Other repository read failure.
    #[error("failed to read repository {path}: {message}")]
    Repository {
        /// The repository path
        path: PathBuf,
        /// git2's message
        message: String,
    },
}

/// What HEAD refers to in a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum HeadState {
    /// HEAD is a branch.
    Branch(String),
    /// HEAD is detached at the given (abbreviated) commit.
    Detached(String),
    /// The repository has no commits yet.
    Unborn,
}

impl fmt::Display for HeadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadState::Branch(name) => write!(f, "branch {}", name),
            HeadState::Detached(oid) => write!(f, "detached at {}", oid),
            HeadState::Unborn => write!(f, "no commits"),
        }
    }
}

/// Version-control operations the environment needs.
///
/// Production code uses [`GitCli`]; tests substitute an implementation that
/// fakes clones on the local filesystem.
pub trait VersionControl {
    /// Clone `url` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone could not be started or exited non-zero.
    fn clone_repo(&self, url: &str, destination: &Path) -> Result<(), GitError>;

    /// Read HEAD of the checkout at `path`.
    fn head(&self, path: &Path) -> Result<HeadState, GitError>;
}

/// Git access through the `git` executable and git2.
///
/// `git clone` output is shown on the terminal while it runs (unless echo
/// is turned off); its stderr is also kept for the error report.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    echo: bool,
}

impl GitCli {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            echo: true,
        }
    }

    /// Show or hide the output of `git clone`.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn spawn_error(&self, source: io::Error) -> GitError {
        GitError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn clone_repo(&self, url: &str, destination: &Path) -> Result<(), GitError> {
        let stdout = if self.echo {
            Stdio::inherit()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(destination)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut captured = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            let mut chunk = [0u8; 4096];
            loop {
                let n = match stderr.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                };
                if self.echo {
                    // Terminal write failures are ignored.
                    let _ = io::stderr().write_all(&chunk[..n]);
                }
                captured.extend_from_slice(&chunk[..n]);
            }
        }

        let status = child.wait().map_err(|e| self.spawn_error(e))?;
        if status.success() {
            Ok(())
        } else {
            Err(GitError::CloneFailed {
                url: url.to_string(),
                destination: destination.to_path_buf(),
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&captured).trim().to_string(),
            })
        }
    }

    fn head(&self, path: &Path) -> Result<HeadState, GitError> {
        let repo = git2::Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepo {
                    path: path.to_path_buf(),
                }
            } else {
                repository_error(path, &e)
            }
        })?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(HeadState::Unborn),
            Err(e) => return Err(repository_error(path, &e)),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(HeadState::Branch(name.to_string()));
            }
        }

        let oid = head
            .target()
            .map(|oid| oid.to_string().chars().take(7).collect())
            .unwrap_or_default();
        Ok(HeadState::Detached(oid))
    }
}

fn repository_error(path: &Path, err: &git2::Error) -> GitError {
    GitError::Repository {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn head_of_non_repo_is_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let err = GitCli::new().head(temp.path()).unwrap_err();
        assert!(matches!(err, GitError::NotARepo { .. }));
    }

    #[test]
    fn head_of_fresh_repo_is_unborn() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();

        assert_eq!(GitCli::new().head(temp.path()).unwrap(), HeadState::Unborn);
    }

    #[test]
    fn head_reports_branch_after_commit() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("refs/heads/main"), &sig, &sig, "init", &tree, &[])
            .unwrap();
        repo.set_head("refs/heads/main").unwrap();

        assert_eq!(
            GitCli::new().head(temp.path()).unwrap(),
            HeadState::Branch("main".to_string())
        );
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_program("definitely-not-a-git-binary");
        let err = git
            .clone_repo("https://example.invalid/x.git", &temp.path().join("x"))
            .unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
    }

    #[test]
    fn failed_clone_reports_status_and_stderr() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no-such-repo");
        let destination = temp.path().join("checkout");

        let err = GitCli::new()
            .echo(false)
            .clone_repo(&missing.to_string_lossy(), &destination)
            .unwrap_err();

        match err {
            GitError::CloneFailed {
                url,
                status,
                stderr,
                ..
            } => {
                assert_eq!(url, missing.to_string_lossy());
                assert!(!status.is_empty());
                assert!(!stderr.is_empty());
            }
            other => panic!("expected CloneFailed, got {other}"),
        }
    }

    #[test]
    fn head_state_display() {
        assert_eq!(
            HeadState::Branch("main".into()).to_string(),
            "branch main"
        );
        assert_eq!(
            HeadState::Detached("abc1234".into()).to_string(),
            "detached at abc1234"
        );
    }
}
