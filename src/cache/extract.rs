//! Lazy extraction of embedded dependency payloads
//!
//! A dependency is extracted at most once per dependency directory. Once the
//! destination exists it is trusted as-is, unless checksum verification is
//! enabled and the manifest declares a digest for it.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed into place, so concurrent processes never observe a partial file.
//! The last writer wins; every writer produces the same bytes.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::bundle::{PayloadSource, checksum_attribute, dependency_attribute};
use crate::error::{Result, config, extraction};
use crate::hash::{hash_file, verify_hash};
use crate::path_utils::{entry_file_name, normalize_entry_name};

/// Materializes dependency payloads into a dependency directory
#[derive(Debug, Clone)]
pub struct DependencyExtractor {
    deps_dir: PathBuf,
    verify_checksums: bool,
}

impl DependencyExtractor {
    pub fn new(deps_dir: impl Into<PathBuf>) -> Self {
        Self {
            deps_dir: deps_dir.into(),
            verify_checksums: false,
        }
    }

    /// Verify declared BLAKE3 digests of extracted files
    #[must_use]
    pub fn with_checksums(mut self, enabled: bool) -> Self {
        self.verify_checksums = enabled;
        self
    }

    pub fn deps_dir(&self) -> &Path {
        &self.deps_dir
    }

    /// Return the on-disk path of dependency `name`, extracting it first if
    /// it is not there yet.
    ///
    /// # Errors
    ///
    /// - Configuration error if the manifest does not declare `name`, the
    ///   declared entry path is unsafe, or the entry is absent from the bundle
    /// - Extraction error on any I/O failure or checksum mismatch
    pub fn locate(&self, source: &dyn PayloadSource, name: &str) -> Result<PathBuf> {
        let (entry, dest) = self.resolve_destination(source, name)?;
        if !source.has_entry(&entry) {
            return Err(config::entry_missing(name, &entry));
        }
        let expected = self.expected_digest(source, name);

        if dest.exists() {
            match expected {
                Some(digest) if !digest_matches(name, &dest, digest)? => {
                    warn!(
                        dependency = name,
                        path = %dest.display(),
                        "Extracted dependency does not match its declared checksum, re-extracting"
                    );
                }
                _ => {
                    debug!(dependency = name, path = %dest.display(), "Reusing extracted dependency");
                    return Ok(dest);
                }
            }
        }

        let bytes = self.extract(source, name, &entry, &dest, expected)?;

        info!(
            dependency = name,
            source = %source.describe(),
            path = %dest.display(),
            bytes,
            "Extracted dependency"
        );
        Ok(dest)
    }

    /// Path dependency `name` is extracted to, without touching the disk
    ///
    /// # Errors
    ///
    /// Configuration error if the manifest does not declare `name` or the
    /// declared entry path is unsafe.
    pub fn destination(&self, source: &dyn PayloadSource, name: &str) -> Result<PathBuf> {
        self.resolve_destination(source, name).map(|(_, dest)| dest)
    }

    fn resolve_destination(
        &self,
        source: &dyn PayloadSource,
        name: &str,
    ) -> Result<(String, PathBuf)> {
        let declared = source
            .attribute(&dependency_attribute(name))
            .ok_or_else(|| config::dependency_not_declared(name))?;
        let entry = normalize_entry_name(declared);

        let file_name = entry_file_name(&entry).ok_or_else(|| {
            config::invalid(format!(
                "dependency '{name}' declares unusable entry path '{declared}'"
            ))
        })?;
        let dest = self.deps_dir.join(file_name);
        Ok((entry, dest))
    }

    fn expected_digest<'a>(&self, source: &'a dyn PayloadSource, name: &str) -> Option<&'a str> {
        if !self.verify_checksums {
            return None;
        }
        source.attribute(&checksum_attribute(name))
    }

    /// Stage the entry in a temp file, check its digest, then rename it into
    /// place. A rejected payload never reaches `dest`.
    fn extract(
        &self,
        source: &dyn PayloadSource,
        name: &str,
        entry: &str,
        dest: &Path,
        expected: Option<&str>,
    ) -> Result<u64> {
        fs::create_dir_all(&self.deps_dir)
            .map_err(|e| extraction::failed(name, &self.deps_dir, e))?;

        let mut staged =
            NamedTempFile::new_in(&self.deps_dir).map_err(|e| extraction::failed(name, dest, e))?;
        let bytes = source
            .copy_entry(entry, staged.as_file_mut())
            .map_err(|e| extraction::failed(name, dest, e))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| extraction::failed(name, dest, e))?;

        if let Some(digest) = expected {
            let actual =
                hash_file(staged.path()).map_err(|e| extraction::failed(name, dest, e))?;
            if !verify_hash(digest, &actual) {
                return Err(extraction::checksum_mismatch(name, digest, actual));
            }
        }

        staged
            .persist(dest)
            .map_err(|e| extraction::failed(name, dest, e.error))?;

        Ok(bytes)
    }
}

fn digest_matches(name: &str, path: &Path, expected: &str) -> Result<bool> {
    let actual = hash_file(path).map_err(|e| extraction::failed(name, path, e))?;
    Ok(verify_hash(expected, &actual))
}
