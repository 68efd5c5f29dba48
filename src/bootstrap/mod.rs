//! Bootstrap sequencing
//!
//! [`Prelaunch`] drives the staged bootstrap:
//!
//! 1. open the host bundle
//! 2. extract the declared dependencies
//! 3. construct the resolution hierarchy
//! 4. resolve and invoke the versioned entry point
//!
//! Each stage runs once, in order. Any failure is terminal.
//!
//! Entry points and plugins are looked up by symbol name in an
//! [`EntryRegistry`] populated at link time.

pub mod discovery;
pub mod plugin;
pub mod registry;
pub mod sequencer;
pub mod summary;

use std::fmt;

pub use discovery::{
    DISCOVERY_ENV, discover_content_packs, discovery_from_env, parse_discovery_locations,
};
pub use plugin::{ConsolePlugin, LaunchPlugin, SplashScreen};
pub use registry::{EntryRegistry, LaunchContext, LaunchTarget};
pub use sequencer::{Environment, Prelaunch};
pub use summary::SummaryLaunch;

/// Versioned symbol of the next-stage entry point
pub const LAUNCH_TARGET: &str = "prelaunch.launch.v1.Launch";

/// Symbol of the built-in headless plugin
pub const CONSOLE_PLUGIN: &str = "prelaunch.launch.v1.ConsolePlugin";

/// Prefixes always resolved from the isolated namespace
pub const ISOLATED_PREFIXES: &[&str] = &["prelaunch.", "runtime."];

/// Loader namespaces that never resolve locally
pub const EXCLUDED_PREFIXES: &[&str] = &["prelaunch.api.", "prelaunch.bootstrap."];

/// Bootstrap progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    BundleOpened,
    DependenciesExtracted,
    HierarchyConstructed,
    EntryInvoked,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::BundleOpened => "bundle-opened",
            Self::DependenciesExtracted => "dependencies-extracted",
            Self::HierarchyConstructed => "hierarchy-constructed",
            Self::EntryInvoked => "entry-invoked",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
