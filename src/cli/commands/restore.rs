//! restore command - Switch back to the system home app

use crate::engine::{self, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Restore system mode.
pub fn restore(ctx: &Context) -> Result<()> {
    let mode = engine::restore(ctx).context("Failed to restore the system home app")?;
    output::success(format!("Mode: {}", mode), ctx.verbosity);
    Ok(())
}
