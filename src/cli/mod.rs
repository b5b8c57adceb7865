//! cli
//!
//! Command-line interface layer for develop-aiidalab.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Compute the path table once per invocation
//! - Delegate to command handlers
//! - Does NOT touch the filesystem directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the [`crate::engine`] for execution. All environment changes flow
//! through the engine's reconcilers.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::paths::{EnvPaths, PathRoots};
use crate::engine;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let roots = PathRoots {
        apps_path: cli.apps_path.clone(),
        local_prefix: cli.local_prefix.clone(),
        system_home_app: cli.system_home_app.clone(),
        config_file: cli.config_file.clone(),
    };
    let paths = EnvPaths::from_roots(&roots).context("Failed to determine environment paths")?;
    output::debug(
        format!(
            "apps: {}, prefix: {}, config: {}",
            paths.apps_root.display(),
            paths.local_prefix.display(),
            paths.config_file.display()
        ),
        verbosity,
    );

    let ctx = engine::Context::new(paths, verbosity);
    commands::dispatch(cli.command, &ctx, &cli.registry_url)
}
