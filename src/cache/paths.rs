//! Host directory layout
//!
//! ```text
//! <game>/
//! ├── config/                      config dir (prelaunch.yaml lives here)
//! └── mods/                        content dir
//!     └── <namespace>/
//!         ├── cache/               scratch space for the next stage
//!         └── dependencies/        extracted dependency payloads
//! ```

use std::path::{Path, PathBuf};

/// Config subdirectory of the game directory
pub const CONFIG_DIR: &str = "config";

/// Content subdirectory of the game directory
pub const MODS_DIR: &str = "mods";

/// Cache subdirectory of the namespace root
pub const CACHE_DIR: &str = "cache";

/// Dependency subdirectory of the namespace root
pub const DEPENDENCIES_DIR: &str = "dependencies";

/// Default namespace directory under the content dir
pub const DEFAULT_NAMESPACE: &str = "prelaunch";

/// Directories handed to the bootstrap by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    game_dir: PathBuf,
    namespace: String,
}

impl Directories {
    pub fn new(game_dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            game_dir: game_dir.into(),
            namespace: namespace.into(),
        }
    }

    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn config_dir(&self) -> PathBuf {
        self.game_dir.join(CONFIG_DIR)
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.game_dir.join(MODS_DIR)
    }

    /// `<mods>/<namespace>`
    pub fn root(&self) -> PathBuf {
        self.mods_dir().join(&self.namespace)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root().join(CACHE_DIR)
    }

    /// Destination directory for extracted dependencies
    pub fn dependencies_dir(&self) -> PathBuf {
        self.root().join(DEPENDENCIES_DIR)
    }
}
