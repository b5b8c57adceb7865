//! app command - Inspect apps installed in the apps directory

use crate::core::apps::AppKind;
use crate::engine::{self, AppEntry, Context};
use crate::git::GitCli;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// List installed apps, or show the one called `name`.
pub fn app(ctx: &Context, name: Option<&str>, json: bool) -> Result<()> {
    let entries = engine::inventory(ctx, &GitCli::new(), name)
        .context("Failed to inspect installed apps")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::print(
            format!("No apps installed in {}", ctx.paths.apps_root.display()),
            ctx.verbosity,
        );
    }
    for entry in &entries {
        println!("{}", describe(entry));
    }
    Ok(())
}

fn describe(entry: &AppEntry) -> String {
    let kind = match &entry.app.kind {
        AppKind::Directory => "directory".to_string(),
        AppKind::Symlink { target } => format!("symlink -> {}", target.display()),
        AppKind::File => "file".to_string(),
    };
    match &entry.head {
        Some(head) => format!("{}\t{}\t({})", entry.app.name, kind, head),
        None => format!("{}\t{}", entry.app.name, kind),
    }
}
