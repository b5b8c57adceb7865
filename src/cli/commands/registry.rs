//! registry command - Query the AiiDAlab app registry
//!
//! The registry client is async; the command drives it from a
//! single-use tokio runtime.

use crate::engine::Context;
use crate::registry::{app_summaries, RegistryClient};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Show one registry entry, the full index, or a listing of all apps.
pub fn registry(ctx: &Context, registry_url: &str, app: Option<&str>, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(registry_async(ctx, registry_url, app, json))
}

async fn registry_async(
    ctx: &Context,
    registry_url: &str,
    app: Option<&str>,
    json: bool,
) -> Result<()> {
    let client = RegistryClient::new(registry_url);
    output::debug(format!("fetching {}", client.index_url()), ctx.verbosity);

    if let Some(name) = app {
        let entry = client.fetch_app(name).await?;
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let index = client.fetch_index().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    let summaries = app_summaries(&index);
    if summaries.is_empty() {
        output::print("No apps registered.", ctx.verbosity);
    }
    for summary in summaries {
        println!("{}\t{}", summary.name, summary.title.unwrap_or_default());
    }
    Ok(())
}
