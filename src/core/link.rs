//! core::link
//!
//! Symlink slot reconciliation.
//!
//! Every link the tool manages goes through [`ensure_symlink`], which looks
//! at what currently occupies a slot and either leaves it alone, creates
//! the link, repoints a link whose current target is known to be safe to
//! replace, or reports a conflict without touching anything.
//!
//! # Example
//!
//! ```no_run
//! use aiidalab_develop::core::link::{ensure_symlink, LinkOutcome};
//! use std::path::Path;
//!
//! let outcome = ensure_symlink(
//!     Path::new("/home/jovyan/apps/home"),
//!     Path::new("/opt/aiidalab-home"),
//!     &[Path::new("/home/jovyan/local/aiidalab-home")],
//! )?;
//! if let LinkOutcome::Conflict(conflict) = outcome {
//!     eprintln!("refusing to touch the slot: {:?}", conflict);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::resolve::{absolute, resolve};

/// Why a slot could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkConflict {
    /// The slot is a symlink, but to neither the target nor a replaceable path.
    UnexpectedTarget {
        /// Where the existing link resolves to.
        found: PathBuf,
    },
    /// The slot is a real directory.
    ExistingDirectory,
    /// The slot is a regular file (or other non-link, non-directory entry).
    NotASymlink,
}

/// Result of reconciling one symlink slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Nothing occupied the slot; the link was created.
    Created,
    /// The slot already resolves to the target.
    AlreadyCorrect,
    /// The slot pointed at a replaceable location and was repointed.
    Replaced {
        /// Where the old link resolved to.
        previous: PathBuf,
    },
    /// The slot is occupied by something we must not touch.
    Conflict(LinkConflict),
}

/// Work out what [`ensure_symlink`] would do, without touching anything.
///
/// # Errors
///
/// Returns an I/O error if the slot cannot be inspected.
pub fn plan_symlink(
    slot: &Path,
    target: &Path,
    replaceable: &[&Path],
) -> io::Result<LinkOutcome> {
    let metadata = match fs::symlink_metadata(slot) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkOutcome::Created),
        Err(e) => return Err(e),
    };

    if !metadata.file_type().is_symlink() {
        let conflict = if metadata.is_dir() {
            LinkConflict::ExistingDirectory
        } else {
            LinkConflict::NotASymlink
        };
        return Ok(LinkOutcome::Conflict(conflict));
    }

    let found = resolve(slot);
    if found == resolve(target) {
        return Ok(LinkOutcome::AlreadyCorrect);
    }

    if replaceable.iter().any(|prior| resolve(prior) == found) {
        return Ok(LinkOutcome::Replaced { previous: found });
    }

    Ok(LinkOutcome::Conflict(LinkConflict::UnexpectedTarget { found }))
}

/// Make `slot` a symlink resolving to `target`.
///
/// `replaceable` lists prior targets the slot may be moved away from. Only
/// the link itself is ever removed; the location it pointed at is left
/// untouched. A conflict performs no mutation.
///
/// # Errors
///
/// Returns an I/O error if inspecting, removing, or creating the link fails.
pub fn ensure_symlink(
    slot: &Path,
    target: &Path,
    replaceable: &[&Path],
) -> io::Result<LinkOutcome> {
    let outcome = plan_symlink(slot, target, replaceable)?;
    // A relative target would be read relative to the slot's directory.
    let target = absolute(target);
    match &outcome {
        LinkOutcome::Created => create_symlink(&target, slot)?,
        LinkOutcome::Replaced { .. } => {
            remove_symlink(slot)?;
            create_symlink(&target, slot)?;
        }
        LinkOutcome::AlreadyCorrect | LinkOutcome::Conflict(_) => {}
    }
    Ok(outcome)
}

/// Create a directory symlink at `link` pointing to `target`.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }
}

fn remove_symlink(link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        fs::remove_file(link)
    }
    #[cfg(windows)]
    {
        fs::remove_dir(link).or_else(|_| fs::remove_file(link))
    }
}
