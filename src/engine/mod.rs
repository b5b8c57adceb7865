//! engine
//!
//! The environment reconciler: `status`, `restore`, and `setup`, plus the
//! read-only app `inventory`.
//!
//! # Architecture
//!
//! Each operation receives a [`Context`] holding the path table computed
//! for this invocation. Operations re-derive the environment state from
//! the filesystem every time; nothing is cached between runs.
//!
//! ```text
//!             setup                restore
//!   Unknown ─────────► Development ───────► System
//!   System  ─────────► Development
//!   Unknown ───────────────────────────────► System
//! ```
//!
//! `status` observes and never transitions.
//!
//! # Invariants
//!
//! - Conflicting state aborts the operation before it is mutated
//! - Only links are ever removed; directories they pointed at are untouched
//! - Every step is idempotent, so operations are safe to re-run after a
//!   partial failure
//!
//! # Example
//!
//! ```ignore
//! use aiidalab_develop::engine::{self, Context};
//! use aiidalab_develop::git::GitCli;
//!
//! let ctx = Context::new(paths, Verbosity::Normal);
//! let report = engine::status(&ctx, &GitCli::new());
//! println!("Mode: {}", report.mode);
//! ```

pub mod errors;
pub mod health;
pub mod inventory;
pub mod restore;
pub mod setup;
pub mod status;

pub use errors::EnvError;
pub use health::{Finding, Severity, StatusReport};
pub use inventory::{inventory, AppEntry};
pub use restore::restore;
pub use setup::{setup, SetupOptions};
pub use status::status;

use std::path::Path;

use crate::core::link::LinkOutcome;
use crate::core::paths::EnvPaths;
use crate::ui::output::{self, Verbosity};

/// Per-invocation execution context.
#[derive(Debug, Clone)]
pub struct Context {
    /// Paths computed once for this invocation.
    pub paths: EnvPaths,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    pub fn new(paths: EnvPaths, verbosity: Verbosity) -> Self {
        Self { paths, verbosity }
    }
}

/// Report what happened to a link slot.
fn announce_link(ctx: &Context, slot: &Path, target: &Path, outcome: &LinkOutcome) {
    match outcome {
        LinkOutcome::Created => output::print(
            format!("Link {} -> {}", slot.display(), target.display()),
            ctx.verbosity,
        ),
        LinkOutcome::Replaced { previous } => {
            output::debug(
                format!("{} pointed to {}", slot.display(), previous.display()),
                ctx.verbosity,
            );
            output::print(format!("Unlink {}", slot.display()), ctx.verbosity);
            output::print(
                format!("Link {} -> {}", slot.display(), target.display()),
                ctx.verbosity,
            );
        }
        LinkOutcome::AlreadyCorrect => output::debug(
            format!("{} already points to {}", slot.display(), target.display()),
            ctx.verbosity,
        ),
        LinkOutcome::Conflict(_) => {}
    }
}

/// Create the directory that will hold `slot` if it does not exist yet.
fn ensure_parent(ctx: &Context, slot: &Path) -> Result<(), EnvError> {
    let Some(parent) = slot.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }
    output::debug(format!("creating {}", parent.display()), ctx.verbosity);
    std::fs::create_dir_all(parent).map_err(EnvError::io(parent))
}
