//! Maps request targets onto files below the document root.

use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// Resolves `target` against `doc_root`.
///
/// Returns the absolute path of the file to serve, or `None` if the target
/// escapes the document root, does not exist, or is not a regular file.
pub async fn resolve(target: &str, doc_root: &Path) -> Option<PathBuf> {
    let path = contained_path(target, doc_root)?;

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Some(path),
        _ => None,
    }
}

/// The lexical half of [`resolve`]: joins, normalizes and checks
/// containment without touching the filesystem.
pub fn contained_path(target: &str, doc_root: &Path) -> Option<PathBuf> {
    let root = normalize(&std::path::absolute(doc_root).ok()?);

    let mut relative = target.trim_start_matches('/').to_string();
    if relative.is_empty() || relative.ends_with('/') {
        relative.push_str(INDEX_FILE);
    }

    let path = normalize(&root.join(relative));
    if path.starts_with(&root) {
        Some(path)
    } else {
        None
    }
}

/// Resolves `.` and `..` components lexically.
///
/// `..` at the filesystem root stays at the root, as with `cd /..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
