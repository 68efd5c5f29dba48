//! Configuration file handling for prelaunch
//!
//! The host may place a `prelaunch.yaml` in its config directory:
//!
//! ```yaml
//! namespace: prelaunch
//! dependencies:
//!   - Runtime
//! isolated_prefixes:
//!   - pkg.iso.
//! verify_checksums: false
//! enable_splash_screen: true
//! plugin: prelaunch.launch.v1.ConsolePlugin
//! ```
//!
//! Every field is optional. A missing file means all defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::paths::DEFAULT_NAMESPACE;
use crate::error::{PrelaunchError, Result, config};

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "prelaunch.yaml";

/// Dependencies extracted when the config names none
pub const DEFAULT_DEPENDENCIES: &[&str] = &["Runtime"];

/// Bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrelaunchConfig {
    /// Directory name under the content dir
    pub namespace: String,

    /// Logical names of the dependencies to extract, in order
    pub dependencies: Vec<String>,

    /// Prefixes resolved from the isolated namespace, in addition to the
    /// built-in ones
    pub isolated_prefixes: Vec<String>,

    /// Verify declared BLAKE3 digests of extracted dependencies
    pub verify_checksums: bool,

    pub enable_splash_screen: bool,

    /// Plugin symbol instantiated alongside the entry point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
}

impl Default for PrelaunchConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(ToString::to_string).collect(),
            isolated_prefixes: Vec::new(),
            verify_checksums: false,
            enable_splash_screen: true,
            plugin: None,
        }
    }
}

impl PrelaunchConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load `prelaunch.yaml` from `config_dir`, falling back to defaults
    /// when the file does not exist
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let display = path.display().to_string();
        let yaml =
            fs::read_to_string(&path).map_err(|e| config::read_failed(&display, e.to_string()))?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            PrelaunchError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(display, reason)
            }
            other => other,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let namespace = self.namespace.trim();
        if namespace.is_empty() || namespace == "." || namespace == ".." {
            return Err(config::invalid("Namespace cannot be empty"));
        }
        if namespace.contains(['/', '\\']) {
            return Err(config::invalid(format!(
                "Namespace '{namespace}' must be a single directory name"
            )));
        }

        if self.dependencies.iter().any(|name| name.trim().is_empty()) {
            return Err(config::invalid("Dependency names cannot be empty"));
        }
        if self.isolated_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(config::invalid("Isolated prefixes cannot be empty"));
        }
        if self.plugin.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(config::invalid("Plugin symbol cannot be empty"));
        }

        Ok(())
    }
}
