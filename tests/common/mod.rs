//! Common test utilities for prelaunch integration tests

#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use prelaunch::bundle::{MANIFEST_ENTRY, checksum_attribute, dependency_attribute};
use prelaunch::path_utils::symbol_entry_path;

/// A throwaway host game directory
pub struct TestGame {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the game directory
    pub path: PathBuf,
}

impl TestGame {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("game");
        std::fs::create_dir_all(&path).expect("Failed to create game directory");
        Self { temp, path }
    }

    /// Write a file relative to the game directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write `config/prelaunch.yaml`
    pub fn write_config(&self, yaml: &str) {
        self.write_file("config/prelaunch.yaml", yaml);
    }

    /// Extracted dependency directory for the default namespace
    pub fn dependencies_dir(&self) -> PathBuf {
        self.path.join("mods/prelaunch/dependencies")
    }

    /// Path next to the game directory, for bundles and host locations
    pub fn outside(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    /// Host bundle with a `Runtime` dependency and the launch entry point
    pub fn standard_bundle(&self) -> PathBuf {
        HostBundle::new()
            .dependency("Runtime", "lib/runtime.tar", &runtime_payload())
            .symbol("prelaunch.launch.v1.Launch")
            .symbol("prelaunch.launch.v1.ConsolePlugin")
            .symbol("pkg.iso.Widget")
            .write_to(&self.outside("host.tar"))
    }
}

/// `prelaunch` binary with developer overrides removed
#[allow(deprecated)]
pub fn prelaunch_cmd() -> Command {
    let mut cmd = Command::cargo_bin("prelaunch").expect("binary built");
    cmd.env_remove("PRELAUNCH_GAME_DIR");
    cmd.env_remove("PRELAUNCH_LOG");
    cmd.env_remove("MOD_CLASSES");
    cmd
}

/// Dependency payload providing `runtime.core.Engine`
pub fn runtime_payload() -> Vec<u8> {
    HostBundle::plain().symbol("runtime.core.Engine").build()
}

/// Builder for tar archives used as host bundles and payloads
#[derive(Debug, Default)]
pub struct HostBundle {
    attributes: Vec<(String, String)>,
    entries: Vec<(String, Vec<u8>)>,
    manifest: bool,
}

impl HostBundle {
    /// Archive with a manifest
    pub fn new() -> Self {
        Self {
            manifest: true,
            ..Self::default()
        }
    }

    /// Archive without a manifest
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn entry(mut self, path: &str, bytes: &[u8]) -> Self {
        self.entries.push((path.to_string(), bytes.to_vec()));
        self
    }

    pub fn dependency(self, name: &str, entry: &str, bytes: &[u8]) -> Self {
        self.attribute(&dependency_attribute(name), entry)
            .entry(entry, bytes)
    }

    pub fn checksum(self, name: &str, digest: &str) -> Self {
        self.attribute(&checksum_attribute(name), digest)
    }

    pub fn symbol(self, symbol: &str) -> Self {
        let entry = symbol_entry_path(symbol);
        self.entry(&entry, symbol.as_bytes())
    }

    pub fn build(&self) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        if self.manifest {
            let mut text = String::from("Manifest-Version: 1.0\r\n");
            for (key, value) in &self.attributes {
                text.push_str(&format!("{key}: {value}\r\n"));
            }
            append(&mut builder, MANIFEST_ENTRY, text.as_bytes());
        }
        for (path, bytes) in &self.entries {
            append(&mut builder, path, bytes);
        }
        builder.into_inner().expect("Failed to finish archive")
    }

    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create bundle directory");
        }
        std::fs::write(path, self.build()).expect("Failed to write bundle");
        path.to_path_buf()
    }
}

/// Directory location providing `symbols`
pub fn symbol_dir(root: &Path, symbols: &[&str]) -> PathBuf {
    for symbol in symbols {
        let path = root.join(symbol_entry_path(symbol));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create symbol directory");
        }
        std::fs::write(&path, symbol.as_bytes()).expect("Failed to write symbol file");
    }
    root.to_path_buf()
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
