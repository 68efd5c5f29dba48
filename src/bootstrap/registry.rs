//! Link-time registry of entry points and plugins
//!
//! A symbol must both resolve through the environment and be registered here
//! before it can be instantiated.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::plugin::{ConsolePlugin, LaunchPlugin};
use super::sequencer::{Environment, Prelaunch};
use super::summary::SummaryLaunch;
use super::{CONSOLE_PLUGIN, LAUNCH_TARGET};
use crate::error::{Result, launch};

/// Arguments handed to the next stage
pub struct LaunchContext<'a> {
    pub prelaunch: &'a Prelaunch,
    pub environment: &'a Environment,
    pub cache_dir: PathBuf,
    pub config_dir: PathBuf,
    pub mods_dir: PathBuf,
    pub discovery_locations: &'a [PathBuf],
    pub plugin: Option<Arc<dyn LaunchPlugin>>,
}

impl fmt::Debug for LaunchContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchContext")
            .field("cache_dir", &self.cache_dir)
            .field("config_dir", &self.config_dir)
            .field("mods_dir", &self.mods_dir)
            .field("discovery_locations", &self.discovery_locations)
            .field("plugin", &self.plugin.is_some())
            .finish_non_exhaustive()
    }
}

/// The next-stage entry point
pub trait LaunchTarget {
    /// Take over after bootstrap
    ///
    /// # Errors
    ///
    /// Any error aborts the launch.
    fn launch(&mut self, ctx: LaunchContext<'_>) -> Result<()>;
}

type TargetFactory = Box<dyn Fn() -> Box<dyn LaunchTarget> + Send + Sync>;
type PluginFactory = Box<dyn Fn() -> Arc<dyn LaunchPlugin> + Send + Sync>;

/// Named factories for entry points and plugins
#[derive(Default)]
pub struct EntryRegistry {
    targets: BTreeMap<String, TargetFactory>,
    plugins: BTreeMap<String, PluginFactory>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the diagnostic [`SummaryLaunch`] entry point and the
    /// headless [`ConsolePlugin`]
    pub fn with_builtins() -> Self {
        let mut targets: BTreeMap<String, TargetFactory> = BTreeMap::new();
        targets.insert(
            LAUNCH_TARGET.to_string(),
            Box::new(|| -> Box<dyn LaunchTarget> { Box::new(SummaryLaunch::default()) }),
        );
        let mut plugins: BTreeMap<String, PluginFactory> = BTreeMap::new();
        plugins.insert(
            CONSOLE_PLUGIN.to_string(),
            Box::new(|| -> Arc<dyn LaunchPlugin> { Arc::new(ConsolePlugin) }),
        );
        Self { targets, plugins }
    }

    /// Register an entry point factory under `symbol`
    ///
    /// # Errors
    ///
    /// Fails if `symbol` is already registered.
    pub fn register_target<F, T>(&mut self, symbol: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: LaunchTarget + 'static,
    {
        let symbol = self.vacant(symbol.into())?;
        self.targets.insert(
            symbol,
            Box::new(move || -> Box<dyn LaunchTarget> { Box::new(factory()) }),
        );
        Ok(())
    }

    /// Register a plugin factory under `symbol`
    ///
    /// # Errors
    ///
    /// Fails if `symbol` is already registered.
    pub fn register_plugin<F, P>(&mut self, symbol: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: LaunchPlugin + 'static,
    {
        let symbol = self.vacant(symbol.into())?;
        self.plugins.insert(
            symbol,
            Box::new(move || -> Arc<dyn LaunchPlugin> { Arc::new(factory()) }),
        );
        Ok(())
    }

    /// Instantiate the entry point registered under `symbol`
    pub fn target(&self, symbol: &str) -> Option<Box<dyn LaunchTarget>> {
        self.targets.get(symbol).map(|factory| factory())
    }

    /// Instantiate the plugin registered under `symbol`
    pub fn plugin(&self, symbol: &str) -> Option<Arc<dyn LaunchPlugin>> {
        self.plugins.get(symbol).map(|factory| factory())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.targets.contains_key(symbol) || self.plugins.contains_key(symbol)
    }

    /// All registered symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .targets
            .keys()
            .chain(self.plugins.keys())
            .map(String::as_str)
            .collect();
        symbols.sort_unstable();
        symbols
    }

    fn vacant(&self, symbol: String) -> Result<String> {
        if self.contains(&symbol) {
            return Err(launch::duplicate_entry(symbol));
        }
        Ok(symbol)
    }
}

impl fmt::Debug for EntryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRegistry")
            .field("symbols", &self.symbols())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::PrelaunchError;

    struct Noop;

    impl LaunchTarget for Noop {
        fn launch(&mut self, _ctx: LaunchContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builtins() {
        let registry = EntryRegistry::with_builtins();
        assert!(registry.target(LAUNCH_TARGET).is_some());
        assert!(registry.plugin(CONSOLE_PLUGIN).is_some());
        assert_eq!(registry.symbols(), vec![CONSOLE_PLUGIN, LAUNCH_TARGET]);
    }

    #[test]
    fn test_register_and_instantiate() {
        let mut registry = EntryRegistry::new();
        registry
            .register_target("app.Main", || Noop)
            .expect("register");
        assert!(registry.target("app.Main").is_some());
        assert!(registry.target("app.Other").is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = EntryRegistry::with_builtins();
        let err = registry
            .register_target(LAUNCH_TARGET, || Noop)
            .expect_err("duplicate");
        assert!(matches!(err, PrelaunchError::DuplicateEntryPoint { .. }));

        let err = registry
            .register_plugin(LAUNCH_TARGET, || ConsolePlugin)
            .expect_err("symbols are shared between targets and plugins");
        assert!(matches!(err, PrelaunchError::DuplicateEntryPoint { .. }));
    }
}
