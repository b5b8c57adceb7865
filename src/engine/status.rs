//! engine::status
//!
//! Read-only scan of the environment.
//!
//! The scan computes the mode and then runs the checks that matter for it.
//! Checks never short-circuit: each one contributes a finding, so a single
//! run shows everything that is wrong.

use std::path::Path;

use crate::core::config::AiidalabConfig;
use crate::core::mode::Mode;
use crate::core::paths::EnvPaths;
use crate::core::resolve::{occupied, same_location};
use crate::core::types::DevRepo;
use crate::git::VersionControl;
use crate::ui::output;

use super::health::{Finding, StatusReport};
use super::Context;

/// Scan the environment and report its mode and health.
pub fn status(ctx: &Context, vcs: &dyn VersionControl) -> StatusReport {
    let paths = &ctx.paths;
    let mode = Mode::detect(paths);
    output::debug(format!("detected mode {}", mode), ctx.verbosity);

    let mut report = StatusReport::new(mode);
    match mode {
        Mode::Development => {
            check_development(paths, &mut report);
            note_checkouts(ctx, vcs, &mut report);
        }
        Mode::System => check_system(paths, &mut report),
        Mode::Unknown => check_unknown(paths, &mut report),
    }
    report
}

fn check_development(paths: &EnvPaths, report: &mut StatusReport) {
    for dir in [&paths.dev_package_dir, &paths.dev_home_dir] {
        report.push(Finding::check(
            dir.is_dir(),
            format!("Directory {} exists.", dir.display()),
            format!("Directory {} does not exist.", dir.display()),
        ));
    }

    let config_file = paths.config_file.display();
    match AiidalabConfig::load(&paths.config_file) {
        Ok(None) => report.push(Finding::issue(format!(
            "File '{}' does not exist.",
            config_file
        ))),
        Ok(Some(config)) => report.push(Finding::check(
            config.develop(),
            format!("Key 'develop' set to true in '{}'.", config_file),
            format!("Key 'develop' not set to true in '{}'.", config_file),
        )),
        Err(e) => report.push(Finding::issue(e.to_string())),
    }

    report.push(link_finding(
        &paths.dev_home_link_slot,
        &paths.dev_package_subdir,
    ));
    report.push(link_finding(&paths.home_app_user, &paths.dev_home_dir));
}

fn check_system(paths: &EnvPaths, report: &mut StatusReport) {
    // Mode detection already established this link.
    report.push(Finding::ok(format!(
        "Link {} to {} is set.",
        paths.home_app_user.display(),
        paths.home_app_system.display()
    )));

    let config_file = paths.config_file.display();
    match AiidalabConfig::load(&paths.config_file) {
        Ok(None) => report.push(Finding::ok(format!(
            "Local config file '{}' does not exist.",
            config_file
        ))),
        Ok(Some(config)) => report.push(Finding::check(
            !config.develop(),
            format!("Key 'develop' not set to true in '{}'.", config_file),
            format!("Key 'develop' set to true in '{}'.", config_file),
        )),
        Err(e) => report.push(Finding::issue(e.to_string())),
    }
}

fn check_unknown(paths: &EnvPaths, report: &mut StatusReport) {
    if occupied(&paths.home_app_user) {
        report.push(Finding::issue(format!(
            "The home app is installed at {}, but is either a local directory or points to an unknown location.",
            paths.home_app_user.display()
        )));
    } else {
        report.push(Finding::issue("The home app is not installed."));
    }
}

fn link_finding(link: &Path, target: &Path) -> Finding {
    Finding::check(
        same_location(link, target),
        format!("Link {} to {} is set.", link.display(), target.display()),
        format!("Link {} to {} is missing.", link.display(), target.display()),
    )
}

fn note_checkouts(ctx: &Context, vcs: &dyn VersionControl, report: &mut StatusReport) {
    for repo in [DevRepo::Package, DevRepo::Home] {
        let dir = ctx.paths.checkout_dir(repo);
        if !dir.is_dir() {
            continue;
        }
        match vcs.head(dir) {
            Ok(head) => report.note(format!("{} checkout is on {}", repo.name(), head)),
            Err(e) => output::debug(
                format!("cannot read HEAD of {}: {}", dir.display(), e),
                ctx.verbosity,
            ),
        }
    }
}
