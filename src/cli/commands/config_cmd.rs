//! config command - Show values from the AiiDAlab configuration file

use crate::core::config::AiidalabConfig;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};
use toml::Value;

/// Print the config file location and every top-level key.
pub fn show(ctx: &Context) -> Result<()> {
    let path = &ctx.paths.config_file;
    let Some(config) = load(ctx)? else {
        output::print(
            format!("{} (does not exist)", path.display()),
            ctx.verbosity,
        );
        return Ok(());
    };

    output::print(path.display(), ctx.verbosity);
    if config.is_empty() {
        output::print("  (empty)", ctx.verbosity);
    }
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
    Ok(())
}

/// Print a single top-level value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let Some(config) = load(ctx)? else {
        bail!(
            "Config file {} does not exist",
            ctx.paths.config_file.display()
        );
    };

    match config.get(key) {
        Some(Value::String(s)) => println!("{}", s),
        Some(value) => println!("{}", value),
        None => bail!("Key '{}' is not set", key),
    }
    Ok(())
}

/// Print the config file location.
pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.paths.config_file.display());
    Ok(())
}

fn load(ctx: &Context) -> Result<Option<AiidalabConfig>> {
    AiidalabConfig::load(&ctx.paths.config_file).context("Failed to load config")
}
