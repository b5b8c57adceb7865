//! develop-aiidalab - Switch an AiiDAlab environment between the system
//! home app and local development checkouts
//!
//! An AiiDAlab environment serves its home app from `apps/home`. Normally
//! that slot links to the system-wide install; for development it links to
//! a clone of `aiidalab-home` that in turn links a clone of the `aiidalab`
//! package. This crate inspects and flips that wiring.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - The `status`, `restore`, and `setup` reconcilers
//! - [`core`] - Paths, link handling, mode detection, config document, domain types
//! - [`git`] - Single interface for cloning and reading checkouts
//! - [`registry`] - Read-only client for the AiiDAlab app registry
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Conflicting filesystem state is reported before anything is changed
//! 2. Only symlinks are ever removed; real directories are never touched
//! 3. Every operation can be re-run after a partial failure
//! 4. Config updates preserve keys this tool does not own

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod registry;
pub mod ui;
