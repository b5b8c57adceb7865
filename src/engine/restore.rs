//! engine::restore
//!
//! Switch the environment back to the system home app.
//!
//! # Steps
//!
//! 1. Require the system install to exist (checked before any mutation)
//! 2. Point `apps/home` at the system install, moving it off the
//!    development checkout if needed
//! 3. Clear the `develop` flag if a config file exists
//!
//! Running `restore` on an already restored environment is a no-op.

use crate::core::config::AiidalabConfig;
use crate::core::link::{ensure_symlink, LinkConflict, LinkOutcome};
use crate::core::mode::Mode;
use crate::ui::output;

use super::errors::EnvError;
use super::{announce_link, ensure_parent, Context};

/// Restore system mode.
///
/// # Errors
///
/// - [`EnvError::SystemHomeAppMissing`] if the system install is absent
/// - [`EnvError::UnexpectedLinkTarget`] if `apps/home` links somewhere unknown
/// - [`EnvError::NotASymlink`] if `apps/home` is a real directory or file
/// - I/O and config errors from the mutations themselves
pub fn restore(ctx: &Context) -> Result<Mode, EnvError> {
    let paths = &ctx.paths;

    if !paths.home_app_system.exists() {
        return Err(EnvError::SystemHomeAppMissing {
            path: paths.home_app_system.clone(),
        });
    }

    ensure_parent(ctx, &paths.home_app_user)?;
    let outcome = ensure_symlink(
        &paths.home_app_user,
        &paths.home_app_system,
        &[paths.dev_home_dir.as_path()],
    )
    .map_err(EnvError::io(&paths.home_app_user))?;

    match outcome {
        LinkOutcome::Conflict(LinkConflict::UnexpectedTarget { found }) => {
            return Err(EnvError::UnexpectedLinkTarget {
                link: paths.home_app_user.clone(),
                found,
            });
        }
        LinkOutcome::Conflict(LinkConflict::ExistingDirectory | LinkConflict::NotASymlink) => {
            return Err(EnvError::NotASymlink {
                path: paths.home_app_user.clone(),
            });
        }
        linked => announce_link(ctx, &paths.home_app_user, &paths.home_app_system, &linked),
    }

    match AiidalabConfig::load(&paths.config_file)? {
        Some(mut config) => {
            config.set_develop(false);
            config.save(&paths.config_file)?;
            output::debug(
                format!("set develop = false in {}", paths.config_file.display()),
                ctx.verbosity,
            );
        }
        None => output::debug(
            format!(
                "config file {} does not exist, nothing to update",
                paths.config_file.display()
            ),
            ctx.verbosity,
        ),
    }

    Ok(Mode::System)
}
