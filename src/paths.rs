//! String-based helpers for vault-relative document paths.
//!
//! Document identity throughout the crate is a `/`-separated path string
//! relative to the vault root (no leading slash). These helpers slice such
//! strings without touching the filesystem, so they work the same for paths
//! that came from disk, from a schedule store, or from a link reference.

use std::{
    borrow::Cow,
    path::{Component, Path},
};

/// Replace OS separators and convert to unicode (via to_string_lossy) on an os path.
pub fn os_path_to_string<P: AsRef<Path>>(os_path_ref: P) -> String {
    os_path_ref
        .as_ref()
        .components()
        .map(|c| match c {
            Component::RootDir => Cow::from("".to_string()),
            _ => c.as_os_str().to_string_lossy(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`os_path_to_string`]: turn a vault-relative path string back
/// into an OS path.
pub fn string_to_os_path(path_string: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(path_string.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// The containing folder of `path`, without a trailing slash. Empty string for
/// documents at the vault root.
pub fn folder_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The final segment of the containing folder. Empty string for documents at
/// the vault root.
pub fn folder_name(path: &str) -> &str {
    let folder = folder_of(path);
    match folder.rfind('/') {
        Some(idx) => &folder[idx + 1..],
        None => folder,
    }
}

/// The final path segment, extension included.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// The final path segment with its extension stripped. A leading dot is not an
/// extension marker, so hidden files keep their names.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Whether a link reference carries an explicit file-extension suffix on its
/// final segment.
pub fn reference_has_extension(reference: &str) -> bool {
    let name = file_name(reference);
    matches!(name.rfind('.'), Some(idx) if idx > 0)
}

/// Normalize a raw link reference: trim whitespace, convert backslashes, and
/// strip leading `./` and `/` components.
pub fn normalize_reference(reference: &str) -> String {
    let mut out = reference.trim().replace('\\', "/");
    while out.starts_with("./") {
        out = out.trim_start_matches("./").to_string();
    }
    out.trim_start_matches('/').to_string()
}

/// Whether `folder` lies within the scope boundary rooted at `scope`: equal to
/// it, or a subfolder of it. An empty scope is the vault root and contains
/// everything.
pub fn in_scope(folder: &str, scope: &str) -> bool {
    scope.is_empty() || folder == scope || folder.starts_with(&format!("{scope}/"))
}
