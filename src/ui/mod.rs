//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output goes through this module so that `--quiet` and
//! `--debug` are honored the same way by every command.

pub mod output;
