//! Path utilities for bundle entries and symbol layouts
//!
//! Archive entries are always addressed with forward slashes, whatever the
//! host platform. Symbols map onto entries by replacing the `.` separators of
//! their name with `/` and appending [`SYMBOL_SUFFIX`].

use std::path::{Component, Path};

/// File suffix of an entry that provides a symbol
pub const SYMBOL_SUFFIX: &str = ".sym";

/// Convert a path to a string with forward slashes.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use prelaunch::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("C:\\Users\\file.txt")), "C:/Users/file.txt");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize a raw archive entry name.
///
/// Backslashes become forward slashes and any leading `./` or `/` is dropped,
/// so `./lib/foo.bin` and `lib/foo.bin` address the same entry.
pub fn normalize_entry_name(raw: &str) -> String {
    let forward = raw.replace('\\', "/");
    let mut trimmed = forward.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }
    trimmed.to_string()
}

/// File name of an archive entry, if the entry is safe to materialize.
///
/// Returns `None` for entries with parent-directory components, absolute
/// roots or no file name at all.
///
/// # Examples
///
/// ```
/// use prelaunch::path_utils::entry_file_name;
///
/// assert_eq!(entry_file_name("lib/foo.bin"), Some("foo.bin"));
/// assert_eq!(entry_file_name("../escape.bin"), None);
/// assert_eq!(entry_file_name("lib/"), None);
/// ```
pub fn entry_file_name(entry: &str) -> Option<&str> {
    if entry.is_empty() || entry.ends_with('/') || entry.starts_with('/') {
        return None;
    }

    let path = Path::new(entry);
    let safe = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if !safe {
        return None;
    }

    entry
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// Entry path that provides `symbol` inside a namespace location.
///
/// # Examples
///
/// ```
/// use prelaunch::path_utils::symbol_entry_path;
///
/// assert_eq!(symbol_entry_path("pkg.iso.Widget"), "pkg/iso/Widget.sym");
/// ```
pub fn symbol_entry_path(symbol: &str) -> String {
    format!("{}{}", symbol.replace('.', "/"), SYMBOL_SUFFIX)
}

/// Symbol provided by an entry path, the inverse of [`symbol_entry_path`].
pub fn entry_symbol_name(entry: &str) -> Option<String> {
    let stem = normalize_entry_name(entry);
    let stem = stem.strip_suffix(SYMBOL_SUFFIX)?;
    if stem.is_empty() || stem.split('/').any(str::is_empty) {
        return None;
    }
    Some(stem.replace('/', "."))
}
