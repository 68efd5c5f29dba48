//! Namespace locations
//!
//! A location is a directory or a tar archive providing symbols through the
//! `a/b/C.sym` entry layout.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::Symbol;
use crate::bundle::archive;
use crate::error::{Result, resolution};
use crate::path_utils::symbol_entry_path;

/// A place symbols can be found in
pub trait Location: Send + Sync + fmt::Debug {
    /// Human-readable origin recorded on resolved symbols
    fn describe(&self) -> String;

    /// Look up `symbol`, returning `None` when this location lacks it
    fn find(&self, symbol: &str) -> Result<Option<Symbol>>;
}

/// Symbols laid out as files beneath a directory
#[derive(Debug, Clone)]
pub struct DirectoryLocation {
    root: PathBuf,
}

impl DirectoryLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Location for DirectoryLocation {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn find(&self, symbol: &str) -> Result<Option<Symbol>> {
        let entry = symbol_entry_path(symbol);
        match fs::metadata(self.root.join(&entry)) {
            Ok(meta) if meta.is_file() => Ok(Some(Symbol::new(symbol, self.describe(), entry))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(resolution::location_unreadable(self.describe(), e)),
        }
    }
}

/// Symbols packaged inside a tar archive.
///
/// The entry list is indexed once on open so lookups never touch the file.
#[derive(Debug, Clone)]
pub struct ArchiveLocation {
    path: PathBuf,
    entries: BTreeSet<String>,
}

impl ArchiveLocation {
    /// Index the entries of the archive at `path`
    ///
    /// # Errors
    ///
    /// Returns a resolution error if the archive cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = archive::entry_names(&path)
            .map_err(|e| resolution::location_unreadable(path.display().to_string(), e))?;
        trace!(location = %path.display(), entries = entries.len(), "Indexed archive location");
        Ok(Self { path, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Location for ArchiveLocation {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn find(&self, symbol: &str) -> Result<Option<Symbol>> {
        let entry = symbol_entry_path(symbol);
        Ok(self
            .entries
            .contains(&entry)
            .then(|| Symbol::new(symbol, self.describe(), entry)))
    }
}

/// Open a directory or archive as a location
///
/// # Errors
///
/// Returns a resolution error if `path` is neither a directory nor a
/// readable archive.
pub fn location_from_path(path: &Path) -> Result<Box<dyn Location>> {
    if path.is_dir() {
        Ok(Box::new(DirectoryLocation::new(path)))
    } else {
        Ok(Box::new(ArchiveLocation::open(path)?))
    }
}
