//! engine::inventory
//!
//! Installed apps together with the revision each one has checked out.

use serde::Serialize;

use crate::core::apps::{find_installed, list_installed, InstalledApp};
use crate::git::{HeadState, VersionControl};
use crate::ui::output;

use super::errors::EnvError;
use super::Context;

/// An installed app and, for Git checkouts, its HEAD.
#[derive(Debug, Clone, Serialize)]
pub struct AppEntry {
    #[serde(flatten)]
    pub app: InstalledApp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<HeadState>,
}

/// List every installed app, or only the one called `name`.
///
/// # Errors
///
/// - [`EnvError::AppNotInstalled`] if `name` is given and not present
/// - [`EnvError::Io`] if the apps directory cannot be read
pub fn inventory(
    ctx: &Context,
    vcs: &dyn VersionControl,
    name: Option<&str>,
) -> Result<Vec<AppEntry>, EnvError> {
    let apps_root = &ctx.paths.apps_root;
    let apps = match name {
        Some(name) => match find_installed(apps_root, name)
            .map_err(EnvError::io(&apps_root.join(name)))?
        {
            Some(app) => vec![app],
            None => {
                return Err(EnvError::AppNotInstalled {
                    name: name.to_string(),
                    apps_root: apps_root.clone(),
                })
            }
        },
        None => list_installed(apps_root).map_err(EnvError::io(apps_root))?,
    };

    Ok(apps
        .into_iter()
        .map(|app| {
            let head = head_of(ctx, vcs, &app);
            AppEntry { app, head }
        })
        .collect())
}

fn head_of(ctx: &Context, vcs: &dyn VersionControl, app: &InstalledApp) -> Option<HeadState> {
    if !app.is_dir_like() {
        return None;
    }
    match vcs.head(&app.path) {
        Ok(head) => Some(head),
        Err(e) => {
            output::debug(e, ctx.verbosity);
            None
        }
    }
}
