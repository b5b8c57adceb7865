//! core
//!
//! Core domain types and filesystem primitives.
//!
//! # Modules
//!
//! - [`types`] - Strong types: GithubUsername, CloneProtocol, DevRepo
//! - [`paths`] - The computed path table for one invocation
//! - [`resolve`] - Lenient symlink-following resolution
//! - [`link`] - Symlink slot reconciliation
//! - [`mode`] - Mode detection
//! - [`config`] - The per-user `aiidalab.toml` document
//! - [`apps`] - Inventory of the apps directory
//!
//! # Design Principles
//!
//! - Paths are computed once and passed by reference
//! - Mode is derived from the filesystem, never cached
//! - Nothing here prints; reporting belongs to the engine and CLI

pub mod apps;
pub mod config;
pub mod link;
pub mod mode;
pub mod paths;
pub mod resolve;
pub mod types;
