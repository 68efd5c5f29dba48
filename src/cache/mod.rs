//! Dependency cache for prelaunch
//!
//! This module materializes the dependency payloads embedded in the host
//! bundle and manages the directories they live in.
//!
//! ## Cache Structure
//!
//! ```text
//! <game>/mods/<namespace>/
//! ├── cache/
//! └── dependencies/
//!     └── <entry file name>
//! ```
//!
//! An extracted file is keyed by the file name of its bundle entry
//! (`lib/foo.bin` becomes `dependencies/foo.bin`).

pub mod extract;
pub mod paths;
pub mod stats;

pub use extract::DependencyExtractor;
pub use paths::Directories;
pub use stats::{
    CacheStats, ExtractedDependency, cache_stats, clear_cache, format_size, list_extracted,
    remove_extracted,
};
