//! Reading indirected values from files under the configured root.
//!
//! Paths taken from `__FILE` variables (or synthesized from `__SECRET`) are
//! always interpreted relative to the resolver's root directory. A single
//! leading `/` is stripped, so `/run/secrets/db` and `run/secrets/db` name the
//! same file. The remaining path must be a clean relative path: no empty
//! segments, no `.` or `..` segments, no trailing slash. Every component must
//! also be a plain name under the platform's own path rules, which rejects
//! `\`-separated traversal and drive prefixes on Windows. Anything else is
//! rejected before the filesystem is touched, so an attacker who controls a
//! `__FILE` variable cannot walk out of the root.

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::error::EnvsecError;

/// Validate `raw` and return it as a path relative to the root.
///
/// Returns `None` for paths that are malformed or escape the root. The bare
/// path `"."` (or `"/."`) names the root itself.
pub fn relative_path(raw: &str) -> Option<&str> {
    let rel = raw.strip_prefix('/').unwrap_or(raw);
    if rel == "." {
        return Some(rel);
    }
    if rel.is_empty() || rel.starts_with('/') || rel.ends_with('/') {
        return None;
    }
    let clean = rel
        .split('/')
        .all(|seg| !seg.is_empty() && seg != "." && seg != "..");
    let plain = Path::new(rel)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (clean && plain).then_some(rel)
}

/// Read the file named by `raw` under `root` and return its trimmed content.
///
/// `var` is the variable the path came from and is only used for errors.
pub fn read_trimmed(root: &Path, var: &str, raw: &str) -> Result<String, EnvsecError> {
    let rel = relative_path(raw).ok_or_else(|| EnvsecError::InvalidPath {
        var: var.to_string(),
        path: raw.to_string(),
    })?;
    let path: PathBuf = if rel == "." {
        root.to_path_buf()
    } else {
        root.join(rel)
    };
    tracing::trace!(var, path = %path.display(), "reading indirected value");

    let mut file = File::open(&path).map_err(|e| EnvsecError::FileOpen {
        var: var.to_string(),
        path: path.clone(),
        source: e,
    })?;
    // Only fails on an already-open handle (e.g. a stale network mount), which
    // no local fixture can reproduce.
    let meta = file.metadata().map_err(|e| EnvsecError::FileStat {
        var: var.to_string(),
        path: path.clone(),
        source: e,
    })?;

    let mut content = String::with_capacity(usize::try_from(meta.len()).unwrap_or(0));
    file.read_to_string(&mut content)
        .map_err(|e| EnvsecError::FileRead {
            var: var.to_string(),
            path: path.clone(),
            source: e,
        })?;

    Ok(content.trim().to_string())
}
