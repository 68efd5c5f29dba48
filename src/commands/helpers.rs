//! Command helper utilities

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prelaunch::cache::Directories;
use prelaunch::config::PrelaunchConfig;
use prelaunch::error::{PrelaunchError, Result};
use prelaunch::resolver::{Namespace, NamespaceResolver, Resolver};

/// Resolve the game directory from an optional argument
///
/// If a path is provided, use it. Otherwise, resolve to the current
/// directory.
pub fn resolve_game_dir(game_dir: Option<PathBuf>) -> Result<PathBuf> {
    match game_dir {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PrelaunchError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Load the config file and derive the directory layout from it
pub fn load_layout(game_dir: Option<PathBuf>) -> Result<(Directories, PrelaunchConfig)> {
    let game_dir = resolve_game_dir(game_dir)?;
    let config = PrelaunchConfig::load(&game_dir.join(prelaunch::cache::paths::CONFIG_DIR))?;
    let directories = Directories::new(game_dir, config.namespace.clone());
    Ok((directories, config))
}

/// Delegate resolver over host locations, `None` when there are none
pub fn host_resolver(paths: &[PathBuf]) -> Result<Option<Arc<dyn Resolver>>> {
    if paths.is_empty() {
        return Ok(None);
    }
    let namespace = Namespace::from_paths(paths)?;
    let resolver: Arc<dyn Resolver> = Arc::new(NamespaceResolver::new(namespace));
    Ok(Some(resolver))
}

/// Canonical form of a user-supplied path, or the path itself if it does
/// not exist
pub fn display_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
