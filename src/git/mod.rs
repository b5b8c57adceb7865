//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module spawns the
//! `git` executable or imports `git2`.
//!
//! # Responsibilities
//!
//! - Cloning the development repositories (`git clone <url> <destination>`)
//! - Reading HEAD of a checkout for status and app listings
//!
//! # Invariants
//!
//! - A failed clone is never retried
//! - A non-zero exit status always surfaces as [`GitError::CloneFailed`]
//!
//! # Example
//!
//! ```ignore
//! use aiidalab_develop::git::{GitCli, VersionControl};
//!
//! let git = GitCli::new();
//! git.clone_repo(url, &destination)?;
//! ```

mod interface;

pub use interface::{GitCli, GitError, HeadState, VersionControl};
