//! core::resolve
//!
//! Lenient path resolution.
//!
//! Mode detection compares where links *end up*, so every comparison goes
//! through [`resolve`]. Unlike [`std::fs::canonicalize`], resolution never
//! fails: components that do not exist are kept verbatim, and a dangling
//! symlink is still followed to the (missing) path it names.
//!
//! # Example
//!
//! ```
//! use aiidalab_develop::core::resolve::resolve;
//! use std::path::Path;
//!
//! // Missing paths resolve to themselves (made absolute).
//! let p = resolve(Path::new("/definitely/not/here"));
//! assert!(p.ends_with("definitely/not/here"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Symlink hops followed before giving up (matches Linux `MAXSYMLINKS`).
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve `path` by following symlinks as far as the filesystem allows.
///
/// Relative paths are anchored at the current directory. A symlink loop
/// yields the path at which resolution stopped.
pub fn resolve(path: &Path) -> PathBuf {
    resolve_hops(&absolute(path), 0)
}

/// Anchor a relative path at the current directory without following links.
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn resolve_hops(path: &Path, hops: usize) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    if hops >= MAX_SYMLINK_HOPS {
        return path.to_path_buf();
    }

    // Dangling (or looping) symlink: follow it by hand.
    if let Ok(target) = fs::read_link(path) {
        let next = if target.is_absolute() {
            target
        } else {
            path.parent().unwrap_or_else(|| Path::new("/")).join(target)
        };
        return resolve_hops(&next, hops + 1);
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => resolve_hops(parent, hops).join(name),
        _ => path.to_path_buf(),
    }
}

/// Whether `a` and `b` resolve to the same location.
pub fn same_location(a: &Path, b: &Path) -> bool {
    resolve(a) == resolve(b)
}

/// Whether something occupies `path`, without following a final symlink.
///
/// A dangling symlink counts as present.
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
