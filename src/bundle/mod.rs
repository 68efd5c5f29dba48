//! Host bundle access
//!
//! The bundle is the host's own packaged archive. Its manifest attributes and
//! entry list are read once when the bundle is opened; payload bytes are only
//! streamed when a dependency actually needs extracting.
//!
//! ## Manifest declarations
//!
//! ```text
//! Additional-Dependencies-<Name>: <entry path>
//! Additional-Dependencies-<Name>-Blake3: <hex digest>   (optional)
//! ```

pub mod archive;
pub mod manifest;

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::error::{Result, config};

pub use manifest::Manifest;

/// Entry holding the bundle manifest
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Prefix of manifest attributes declaring embedded dependencies
pub const DEPENDENCY_ATTRIBUTE_PREFIX: &str = "Additional-Dependencies-";

/// Suffix of manifest attributes declaring a dependency's BLAKE3 digest
pub const CHECKSUM_ATTRIBUTE_SUFFIX: &str = "-Blake3";

/// Manifest attribute declaring the entry of dependency `name`
pub fn dependency_attribute(name: &str) -> String {
    format!("{DEPENDENCY_ATTRIBUTE_PREFIX}{name}")
}

/// Manifest attribute declaring the digest of dependency `name`
pub fn checksum_attribute(name: &str) -> String {
    format!("{DEPENDENCY_ATTRIBUTE_PREFIX}{name}{CHECKSUM_ATTRIBUTE_SUFFIX}")
}

/// Source of embedded dependency payloads.
///
/// Implemented by [`Bundle`]; the extractor only depends on this trait.
pub trait PayloadSource {
    /// Human-readable origin, used in diagnostics
    fn describe(&self) -> String;

    /// Manifest attribute value
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Whether the payload contains `entry`
    fn has_entry(&self, entry: &str) -> bool;

    /// Stream `entry` into `dest`, returning the number of bytes written
    fn copy_entry(&self, entry: &str, dest: &mut dyn Write) -> io::Result<u64>;
}

/// The host's packaged archive
#[derive(Debug, Clone)]
pub struct Bundle {
    path: PathBuf,
    uri: Url,
    manifest: Manifest,
    entries: BTreeSet<String>,
}

impl Bundle {
    /// Open a bundle, reading its manifest and entry list.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the file cannot be read, is not a
    /// tar archive or carries no manifest.
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let path = dunce::canonicalize(path)
            .map_err(|e| config::bundle_invalid(&display, format!("cannot access: {e}")))?;
        if !path.is_file() {
            return Err(config::bundle_invalid(&display, "not a file"));
        }

        let mut entries = BTreeSet::new();
        let mut manifest_text = None;
        archive::for_each_entry(&path, |name, reader| {
            if name == MANIFEST_ENTRY {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                manifest_text = Some(text);
            }
            entries.insert(name.to_string());
            Ok(true)
        })
        .map_err(|e| config::bundle_invalid(&display, format!("unreadable archive: {e}")))?;

        let manifest_text = manifest_text
            .ok_or_else(|| config::bundle_invalid(&display, format!("missing {MANIFEST_ENTRY}")))?;
        let manifest = Manifest::parse(&manifest_text);

        let uri = Url::from_file_path(&path)
            .map_err(|()| config::bundle_invalid(&display, "path cannot be expressed as a URI"))?;

        debug!(
            bundle = %path.display(),
            entries = entries.len(),
            attributes = manifest.len(),
            "Opened bundle"
        );

        Ok(Self {
            path,
            uri,
            manifest,
            entries,
        })
    }

    /// Canonical filesystem path of the bundle
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI of the bundle
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Names of all regular file entries
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entry path declared for dependency `name`
    pub fn dependency_entry(&self, name: &str) -> Option<&str> {
        self.manifest.get(&dependency_attribute(name))
    }

    /// Names of every dependency declared in the manifest
    pub fn declared_dependencies(&self) -> Vec<String> {
        self.manifest
            .iter()
            .filter_map(|(key, _)| {
                let name = strip_prefix_ignore_case(key, DEPENDENCY_ATTRIBUTE_PREFIX)?;
                let is_checksum = name
                    .to_ascii_lowercase()
                    .ends_with(&CHECKSUM_ATTRIBUTE_SUFFIX.to_ascii_lowercase());
                (!name.is_empty() && !is_checksum).then(|| name.to_string())
            })
            .collect()
    }
}

impl PayloadSource for Bundle {
    fn describe(&self) -> String {
        self.uri.to_string()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.manifest.get(key)
    }

    fn has_entry(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    fn copy_entry(&self, entry: &str, dest: &mut dyn Write) -> io::Result<u64> {
        archive::copy_entry(&self.path, entry, dest)
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}
