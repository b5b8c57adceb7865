//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine (or the registry client) to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT touch links or the config file directly.
//!
//! # Async Commands
//!
//! `registry` is async because it performs network I/O. Its handler
//! builds a tokio runtime and blocks on it, so dispatch stays synchronous.

mod app;
mod completion;
mod config_cmd;
mod registry;
mod restore;
mod setup;
mod status;

// Re-export command functions for testing and direct invocation
pub use app::app;
pub use completion::completion;
pub use config_cmd::{get as config_get, path as config_path, show as config_show};
pub use registry::registry;
pub use restore::restore;
pub use setup::setup;
pub use status::status;

use crate::cli::args::{Command, ConfigAction};
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, registry_url: &str) -> Result<()> {
    match command {
        Command::Status { json } => status::status(ctx, json),
        Command::Restore => restore::restore(ctx),
        Command::Setup {
            github_username,
            use_ssh,
        } => setup::setup(ctx, github_username, use_ssh),
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Registry { app, json } => {
            registry::registry(ctx, registry_url, app.as_deref(), json)
        }
        Command::App { name, json } => app::app(ctx, name.as_deref(), json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
