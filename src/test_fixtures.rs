//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helpers to create temp directories, bundles and
//! symbol directories with a single call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{BundleBuilder, create_temp_dir};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let bundle = BundleBuilder::new()
//!         .dependency("Foo", "lib/foo.bin", b"foo")
//!         .symbol("pkg.iso.Widget")
//!         .write_to(&temp.path().join("host.tar"));
//! }
//! ```

#![allow(clippy::expect_used)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use crate::bundle::{MANIFEST_ENTRY, dependency_attribute};
use crate::path_utils::symbol_entry_path;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a directory location providing `symbols`.
///
/// # Panics
///
/// Panics if a symbol file cannot be written.
pub fn create_symbol_dir(root: &Path, symbols: &[&str]) -> PathBuf {
    for symbol in symbols {
        let path = root.join(symbol_entry_path(symbol));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create symbol directory");
        }
        std::fs::write(&path, symbol.as_bytes()).expect("Failed to write symbol file");
    }
    root.to_path_buf()
}

/// Builder for tar bundles used as hosts, dependency payloads or locations
#[derive(Debug, Default)]
pub struct BundleBuilder {
    attributes: Vec<(String, String)>,
    entries: Vec<(String, Vec<u8>)>,
    manifest: bool,
    gzip: bool,
}

impl BundleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            manifest: true,
            ..Self::default()
        }
    }

    /// Add a manifest attribute
    #[must_use]
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a raw entry
    #[must_use]
    pub fn entry(mut self, path: &str, bytes: &[u8]) -> Self {
        self.entries.push((path.to_string(), bytes.to_vec()));
        self
    }

    /// Declare dependency `name` and embed its payload at `entry`
    #[must_use]
    pub fn dependency(self, name: &str, entry: &str, bytes: &[u8]) -> Self {
        self.attribute(&dependency_attribute(name), entry)
            .entry(entry, bytes)
    }

    /// Embed an entry providing `symbol`
    #[must_use]
    pub fn symbol(self, symbol: &str) -> Self {
        let entry = symbol_entry_path(symbol);
        self.entry(&entry, symbol.as_bytes())
    }

    /// Leave out the manifest entry
    #[must_use]
    pub fn without_manifest(mut self) -> Self {
        self.manifest = false;
        self
    }

    /// Gzip-compress the archive
    #[must_use]
    pub fn gzip(mut self) -> Self {
        self.gzip = true;
        self
    }

    /// Archive bytes
    ///
    /// # Panics
    ///
    /// Panics if the archive cannot be assembled.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());

        if self.manifest {
            let mut text = String::from("Manifest-Version: 1.0\r\n");
            for (key, value) in &self.attributes {
                text.push_str(&format!("{key}: {value}\r\n"));
            }
            text.push_str("\r\n");
            append(&mut builder, MANIFEST_ENTRY, text.as_bytes());
        }
        for (path, bytes) in &self.entries {
            append(&mut builder, path, bytes);
        }

        let tar = builder.into_inner().expect("Failed to finish archive");
        if !self.gzip {
            return tar;
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar).expect("Failed to compress archive");
        encoder.finish().expect("Failed to finish compression")
    }

    /// Write the archive to `path` and return it
    ///
    /// # Panics
    ///
    /// Panics if the archive cannot be written.
    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create bundle directory");
        }
        let mut file = File::create(path).expect("Failed to create bundle file");
        file.write_all(&self.build()).expect("Failed to write bundle");
        path.to_path_buf()
    }
}

fn append(builder: &mut tar::Builder<Vec<u8>>, path: &str, bytes: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_size(bytes.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, path, bytes)
        .expect("Failed to append archive entry");
}
