//! engine::setup
//!
//! Switch the environment to the local development checkouts.
//!
//! # Steps
//!
//! 1. Refuse early if `apps/home` is occupied by something we cannot move
//! 2. Clone `aiidalab` and `aiidalab-home` into the local prefix (skipped
//!    for checkouts that already exist)
//! 3. Link the package into the home app checkout
//! 4. Point `apps/home` at the home app checkout
//! 5. Set the `develop` flag, creating the config file if needed
//!
//! Each step is skipped when already satisfied, so a partially completed
//! setup can simply be run again.

use crate::core::config::AiidalabConfig;
use crate::core::link::{ensure_symlink, plan_symlink, LinkConflict, LinkOutcome};
use crate::core::mode::Mode;
use crate::core::paths::EnvPaths;
use crate::core::resolve::{occupied, resolve};
use crate::core::types::{CloneProtocol, DevRepo, GithubUsername};
use crate::git::VersionControl;
use crate::ui::output;

use super::errors::EnvError;
use super::{announce_link, ensure_parent, Context};

/// Where to clone the development repositories from.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Owner of the `aiidalab` and `aiidalab-home` forks.
    pub github_username: GithubUsername,
    /// Clone over SSH or HTTPS.
    pub protocol: CloneProtocol,
}

impl SetupOptions {
    /// Clone URL for one of the development repositories.
    pub fn clone_url(&self, repo: DevRepo) -> String {
        repo.clone_url(&self.github_username, self.protocol)
    }
}

/// Set up development mode.
///
/// # Errors
///
/// - [`EnvError::ExistingDirectory`] / [`EnvError::NotASymlink`] if
///   `apps/home` is not a symlink (reported before anything is cloned)
/// - [`EnvError::UnexpectedLinkTarget`] if `apps/home` links somewhere unknown
/// - [`EnvError::LinkSlotOccupied`] if the package link slot is taken
/// - [`EnvError::Git`] if a clone fails
/// - I/O and config errors from the mutations themselves
pub fn setup(
    ctx: &Context,
    vcs: &dyn VersionControl,
    options: &SetupOptions,
) -> Result<Mode, EnvError> {
    let paths = &ctx.paths;

    let home_plan = plan_home_link(paths)?;
    home_conflict(paths, &home_plan)?;
    if occupied(&paths.dev_home_dir) {
        package_link_conflict(paths, &plan_package_link(paths)?)?;
    }

    for repo in [DevRepo::Package, DevRepo::Home] {
        clone_if_missing(ctx, vcs, repo, &options.clone_url(repo))?;
    }

    let outcome = ensure_symlink(&paths.dev_home_link_slot, &paths.dev_package_subdir, &[])
        .map_err(EnvError::io(&paths.dev_home_link_slot))?;
    package_link_conflict(paths, &outcome)?;
    announce_link(
        ctx,
        &paths.dev_home_link_slot,
        &paths.dev_package_subdir,
        &outcome,
    );

    ensure_parent(ctx, &paths.home_app_user)?;
    let outcome = ensure_symlink(
        &paths.home_app_user,
        &paths.dev_home_dir,
        &[paths.home_app_system.as_path()],
    )
    .map_err(EnvError::io(&paths.home_app_user))?;
    home_conflict(paths, &outcome)?;
    announce_link(ctx, &paths.home_app_user, &paths.dev_home_dir, &outcome);

    let mut config = AiidalabConfig::load_or_default(&paths.config_file)?;
    config.set_develop(true);
    config.save(&paths.config_file)?;
    output::debug(
        format!("set develop = true in {}", paths.config_file.display()),
        ctx.verbosity,
    );

    Ok(Mode::Development)
}

fn plan_home_link(paths: &EnvPaths) -> Result<LinkOutcome, EnvError> {
    plan_symlink(
        &paths.home_app_user,
        &paths.dev_home_dir,
        &[paths.home_app_system.as_path()],
    )
    .map_err(EnvError::io(&paths.home_app_user))
}

fn plan_package_link(paths: &EnvPaths) -> Result<LinkOutcome, EnvError> {
    plan_symlink(&paths.dev_home_link_slot, &paths.dev_package_subdir, &[])
        .map_err(EnvError::io(&paths.dev_home_link_slot))
}

fn home_conflict(paths: &EnvPaths, outcome: &LinkOutcome) -> Result<(), EnvError> {
    match outcome {
        LinkOutcome::Conflict(LinkConflict::UnexpectedTarget { found }) => {
            Err(EnvError::UnexpectedLinkTarget {
                link: paths.home_app_user.clone(),
                found: found.clone(),
            })
        }
        LinkOutcome::Conflict(LinkConflict::ExistingDirectory) => Err(EnvError::ExistingDirectory {
            path: paths.home_app_user.clone(),
        }),
        LinkOutcome::Conflict(LinkConflict::NotASymlink) => Err(EnvError::NotASymlink {
            path: paths.home_app_user.clone(),
        }),
        _ => Ok(()),
    }
}

fn package_link_conflict(paths: &EnvPaths, outcome: &LinkOutcome) -> Result<(), EnvError> {
    match outcome {
        LinkOutcome::Conflict(conflict) => {
            let found = match conflict {
                LinkConflict::UnexpectedTarget { found } => found.clone(),
                LinkConflict::ExistingDirectory | LinkConflict::NotASymlink => {
                    resolve(&paths.dev_home_link_slot)
                }
            };
            Err(EnvError::LinkSlotOccupied {
                link: paths.dev_home_link_slot.clone(),
                found,
            })
        }
        _ => Ok(()),
    }
}

fn clone_if_missing(
    ctx: &Context,
    vcs: &dyn VersionControl,
    repo: DevRepo,
    url: &str,
) -> Result<(), EnvError> {
    let destination = ctx.paths.checkout_dir(repo);
    if occupied(destination) {
        match vcs.head(destination) {
            Ok(head) => output::debug(
                format!(
                    "{} exists ({}), not cloning {}",
                    destination.display(),
                    head,
                    url
                ),
                ctx.verbosity,
            ),
            Err(e) => output::warn(
                format!(
                    "{} exists but is not a readable checkout ({}), not cloning",
                    destination.display(),
                    e
                ),
                ctx.verbosity,
            ),
        }
        return Ok(());
    }

    ensure_parent(ctx, destination)?;
    output::print(
        format!("Cloning {} into {}", url, destination.display()),
        ctx.verbosity,
    );
    vcs.clone_repo(url, destination)?;
    Ok(())
}
