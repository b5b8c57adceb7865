//! setup command - Switch to the local development checkouts

use crate::core::types::{CloneProtocol, GithubUsername};
use crate::engine::{self, Context, SetupOptions};
use crate::git::GitCli;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Set up development mode, cloning from `github_username`'s repositories.
pub fn setup(ctx: &Context, github_username: GithubUsername, use_ssh: bool) -> Result<()> {
    let options = SetupOptions {
        github_username,
        protocol: CloneProtocol::from_use_ssh(use_ssh),
    };
    output::debug(
        format!(
            "cloning from github.com/{} over {:?}",
            options.github_username, options.protocol
        ),
        ctx.verbosity,
    );

    let git = GitCli::new().echo(ctx.verbosity != Verbosity::Quiet);
    let mode = engine::setup(ctx, &git, &options)
        .context("Failed to set up development mode")?;
    output::success(format!("Mode: {}", mode), ctx.verbosity);
    Ok(())
}
