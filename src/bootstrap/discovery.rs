//! Discovery locations and content packs
//!
//! The host passes extra discovery locations through [`DISCOVERY_ENV`] as a
//! platform path list. Elements may carry a `name%%path` prefix; only the
//! segment after the last `%%` is the path.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable listing discovery locations
pub const DISCOVERY_ENV: &str = "MOD_CLASSES";

const NAME_SEPARATOR: &str = "%%";

/// Split a discovery path list, dropping empty elements
pub fn parse_discovery_locations(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter_map(|element| {
            let element = element.to_string_lossy().into_owned();
            let path = element
                .rsplit(NAME_SEPARATOR)
                .next()
                .unwrap_or(&element)
                .trim();
            (!path.is_empty()).then(|| PathBuf::from(path))
        })
        .collect()
}

/// Discovery locations from the environment, empty when unset
pub fn discovery_from_env() -> Vec<PathBuf> {
    std::env::var_os(DISCOVERY_ENV)
        .map(|value| parse_discovery_locations(&value))
        .unwrap_or_default()
}

/// Content packs keyed by namespace.
///
/// Every directory or tar archive directly inside `mods_dir` (except the
/// bootstrap's own `exclude` directory) is a pack, followed by the discovery
/// locations. The namespace is the file name without archive extensions; the
/// first source seen for a namespace wins.
pub fn discover_content_packs(
    mods_dir: &Path,
    discovery: &[PathBuf],
    exclude: &str,
) -> BTreeMap<String, PathBuf> {
    let mut packs = BTreeMap::new();

    let mut candidates: Vec<PathBuf> = fs::read_dir(mods_dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.file_name() != Some(OsStr::new(exclude)))
                .filter(|path| path.is_dir() || pack_namespace(path).is_some())
                .collect()
        })
        .unwrap_or_default();
    candidates.sort();
    candidates.extend(discovery.iter().cloned());

    for path in candidates {
        let Some(namespace) = pack_namespace(&path) else {
            continue;
        };
        packs.entry(namespace).or_insert(path);
    }

    debug!(packs = packs.len(), "Discovered content packs");
    packs
}

fn pack_namespace(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    if path.is_dir() {
        return Some(name.into_owned());
    }
    [".tar.gz", ".tgz", ".tar"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
        .map(ToString::to_string)
}
