//! Dependency cache statistics and management
//!
//! This module provides functions for listing, removing, and getting
//! statistics about extracted dependencies. The bootstrap itself never
//! deletes anything; these are operator functions.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PrelaunchError, Result};

/// Format a byte count as human-readable string
pub fn format_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{bytes} B")
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else if size < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
    }
}

/// An extracted dependency on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDependency {
    /// File name inside the dependency directory
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl ExtractedDependency {
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of extracted dependencies
    pub dependencies: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    pub fn formatted_size(&self) -> String {
        format_size(self.total_size)
    }
}

/// List extracted dependencies, sorted by name
pub fn list_extracted(deps_dir: &Path) -> Result<Vec<ExtractedDependency>> {
    if !deps_dir.exists() {
        return Ok(Vec::new());
    }

    let mut dependencies = Vec::new();
    for entry in fs::read_dir(deps_dir).map_err(|e| PrelaunchError::CacheOperationFailed {
        message: format!("Failed to read dependency directory: {e}"),
    })? {
        let entry = entry.map_err(|e| PrelaunchError::CacheOperationFailed {
            message: format!("Failed to read entry: {e}"),
        })?;

        let path = entry.path();
        let size = if path.is_dir() {
            dir_size(&path)?
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        };

        dependencies.push(ExtractedDependency {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
            size,
        });
    }

    dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dependencies)
}

/// Get cache statistics
pub fn cache_stats(deps_dir: &Path) -> Result<CacheStats> {
    let dependencies = list_extracted(deps_dir)?;
    Ok(CacheStats {
        dependencies: dependencies.len(),
        total_size: dependencies.iter().map(|d| d.size).sum(),
    })
}

/// Remove one extracted dependency by file name
pub fn remove_extracted(deps_dir: &Path, name: &str) -> Result<()> {
    let path = deps_dir.join(name);
    if name.contains(['/', '\\']) || !path.exists() {
        return Err(PrelaunchError::CacheOperationFailed {
            message: format!("Dependency not found in cache: {name}"),
        });
    }

    let removed = if path.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };
    removed.map_err(|e| PrelaunchError::CacheOperationFailed {
        message: format!("Failed to remove extracted dependency: {e}"),
    })
}

/// Remove every extracted dependency
pub fn clear_cache(deps_dir: &Path) -> Result<()> {
    if deps_dir.exists() {
        fs::remove_dir_all(deps_dir).map_err(|e| PrelaunchError::CacheOperationFailed {
            message: format!("Failed to clear cache: {e}"),
        })?;
    }
    Ok(())
}

/// Calculate directory size recursively
fn dir_size(path: &Path) -> Result<u64> {
    let mut size = 0u64;
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            size += entry
                .metadata()
                .map_err(|e| PrelaunchError::CacheOperationFailed {
                    message: format!("Failed to get metadata: {e}"),
                })?
                .len();
        }
    }
    Ok(size)
}
