//! The staged bootstrap sequencer

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::registry::{EntryRegistry, LaunchContext};
use super::{EXCLUDED_PREFIXES, ISOLATED_PREFIXES, LAUNCH_TARGET, Stage};
use crate::bundle::Bundle;
use crate::cache::{DependencyExtractor, Directories};
use crate::config::PrelaunchConfig;
use crate::error::{PrelaunchError, Result, config, extraction, launch};
use crate::logging::LogForwarder;
use crate::resolver::{
    Namespace, Prefixes, ResolutionHierarchy, Resolver, SymbolHandle, location_from_path,
};

/// Handle to the constructed isolated environment.
///
/// Cheap to clone; every clone shares one hierarchy and its cache.
#[derive(Debug, Clone)]
pub struct Environment(Arc<ResolutionHierarchy>);

impl Environment {
    pub fn new(hierarchy: ResolutionHierarchy) -> Self {
        Self(Arc::new(hierarchy))
    }

    pub fn hierarchy(&self) -> &ResolutionHierarchy {
        &self.0
    }

    /// This environment as a delegate for another hierarchy
    pub fn as_resolver(&self) -> Arc<dyn Resolver> {
        Arc::clone(&self.0) as Arc<dyn Resolver>
    }
}

impl Resolver for Environment {
    fn resolve(&self, name: &str) -> Result<SymbolHandle> {
        self.0.resolve(name)
    }
}

/// Drives the bootstrap of one isolated environment
pub struct Prelaunch {
    directories: Directories,
    config: PrelaunchConfig,
    extractor: DependencyExtractor,
    bundle: Option<Bundle>,
    extracted: Vec<(String, PathBuf)>,
    environment: Option<Environment>,
    log_forwarder: Option<LogForwarder>,
    stage: Stage,
}

impl Prelaunch {
    /// Create a sequencer that has not opened its bundle yet
    pub fn new(directories: Directories, config: PrelaunchConfig) -> Self {
        let extractor = DependencyExtractor::new(directories.dependencies_dir())
            .with_checksums(config.verify_checksums);
        Self {
            directories,
            config,
            extractor,
            bundle: None,
            extracted: Vec::new(),
            environment: None,
            log_forwarder: None,
            stage: Stage::Uninitialized,
        }
    }

    /// Create a sequencer and open the host bundle
    ///
    /// # Errors
    ///
    /// See [`Prelaunch::open_bundle`].
    pub fn open(
        directories: Directories,
        bundle_path: &Path,
        config: PrelaunchConfig,
    ) -> Result<Self> {
        let mut prelaunch = Self::new(directories, config);
        prelaunch.open_bundle(bundle_path)?;
        Ok(prelaunch)
    }

    /// Hand the next stage a way to receive log lines
    #[must_use]
    pub fn with_log_forwarder(mut self, forwarder: LogForwarder) -> Self {
        self.log_forwarder = Some(forwarder);
        self
    }

    /// Open the host bundle and create the cache directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundle cannot be read, or an
    /// extraction error if the cache directory cannot be created.
    pub fn open_bundle(&mut self, bundle_path: &Path) -> Result<()> {
        self.expect_stage(Stage::Uninitialized, "open the bundle")?;

        let result = self.open_bundle_inner(bundle_path);
        self.settle(result, Stage::BundleOpened)
    }

    fn open_bundle_inner(&mut self, bundle_path: &Path) -> Result<()> {
        let cache_dir = self.directories.cache_dir();
        fs::create_dir_all(&cache_dir)
            .map_err(|e| extraction::failed("cache", &cache_dir, e))?;

        let bundle = Bundle::open(bundle_path)?;
        info!(bundle = %bundle.uri(), namespace = self.directories.namespace(), "Opened host bundle");
        self.bundle = Some(bundle);
        Ok(())
    }

    /// Extract one declared dependency, returning its path.
    ///
    /// Available to the next stage as a service once the bundle is open.
    ///
    /// # Errors
    ///
    /// Returns a configuration or extraction error, or a launch error if the
    /// bundle has not been opened.
    pub fn extract_dependency(&self, name: &str) -> Result<PathBuf> {
        let bundle = self
            .bundle
            .as_ref()
            .ok_or_else(|| launch::invalid_stage("extract a dependency", self.stage))?;
        self.extractor.locate(bundle, name)
    }

    /// Extract every configured dependency
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if two dependencies share a
    /// destination file, otherwise on the first dependency that cannot be
    /// extracted.
    pub fn extract_dependencies(&mut self) -> Result<Vec<PathBuf>> {
        self.expect_stage(Stage::BundleOpened, "extract dependencies")?;

        let result = self.check_destinations().and_then(|()| {
            self.config
                .dependencies
                .iter()
                .map(|name| Ok((name.clone(), self.extract_dependency(name)?)))
                .collect::<Result<Vec<_>>>()
        });
        let extracted = self.settle(result, Stage::DependenciesExtracted)?;

        let paths = extracted.iter().map(|(_, path)| path.clone()).collect();
        info!(count = extracted.len(), "Dependencies ready");
        self.extracted = extracted;
        Ok(paths)
    }

    /// Destinations are keyed by file name only, so distinct entries such as
    /// `liba/core.bin` and `libb/core.bin` must be rejected up front.
    fn check_destinations(&self) -> Result<()> {
        let bundle = self
            .bundle
            .as_ref()
            .ok_or_else(|| launch::invalid_stage("extract dependencies", self.stage))?;

        let mut claimed: BTreeMap<PathBuf, &str> = BTreeMap::new();
        for name in &self.config.dependencies {
            let dest = self.extractor.destination(bundle, name)?;
            match claimed.get(&dest) {
                Some(first) if *first != name.as_str() => {
                    return Err(config::dependency_collision(*first, name, &dest));
                }
                _ => {
                    claimed.insert(dest, name);
                }
            }
        }
        Ok(())
    }

    /// Build the isolated hierarchy over the host bundle and the extracted
    /// dependencies, delegating to `host`
    ///
    /// # Errors
    ///
    /// Returns a resolution error if a location cannot be opened.
    pub fn construct_hierarchy(&mut self, host: Option<Arc<dyn Resolver>>) -> Result<Environment> {
        self.expect_stage(Stage::DependenciesExtracted, "construct the hierarchy")?;

        let result = self.build_hierarchy(host);
        let environment = self.settle(result, Stage::HierarchyConstructed)?;
        self.environment = Some(environment.clone());
        Ok(environment)
    }

    fn build_hierarchy(&self, host: Option<Arc<dyn Resolver>>) -> Result<Environment> {
        let bundle = self
            .bundle
            .as_ref()
            .ok_or_else(|| launch::invalid_stage("construct the hierarchy", self.stage))?;

        let mut namespace = Namespace::new();
        namespace.push(location_from_path(bundle.path())?);
        for (_, path) in &self.extracted {
            namespace.push(location_from_path(path)?);
        }

        let mut priority = Prefixes::new(ISOLATED_PREFIXES.iter().copied());
        priority.extend(self.config.isolated_prefixes.iter().cloned());

        let hierarchy = ResolutionHierarchy::builder()
            .namespace(namespace)
            .delegate(host)
            .priority(priority)
            .exclusions(Prefixes::new(EXCLUDED_PREFIXES.iter().copied()))
            .build();
        info!(
            locations = hierarchy.namespace().len(),
            delegate = hierarchy.has_delegate(),
            "Constructed resolution hierarchy"
        );
        Ok(Environment::new(hierarchy))
    }

    /// Resolve the versioned entry point, instantiate it and hand over
    ///
    /// # Errors
    ///
    /// Returns a launch error if the entry point or plugin cannot be
    /// resolved or instantiated, or if the entry point fails.
    pub fn invoke_entry(
        &mut self,
        registry: &EntryRegistry,
        discovery_locations: &[PathBuf],
        plugin: Option<&str>,
    ) -> Result<()> {
        self.expect_stage(Stage::HierarchyConstructed, "invoke the entry point")?;

        let result = self.invoke_entry_inner(registry, discovery_locations, plugin);
        self.settle(result, Stage::EntryInvoked)?;
        info!(entry = LAUNCH_TARGET, "Launch complete");
        Ok(())
    }

    fn invoke_entry_inner(
        &self,
        registry: &EntryRegistry,
        discovery_locations: &[PathBuf],
        plugin: Option<&str>,
    ) -> Result<()> {
        let environment = self
            .environment
            .as_ref()
            .ok_or_else(|| launch::invalid_stage("invoke the entry point", self.stage))?;

        let entry = environment
            .resolve(LAUNCH_TARGET)
            .map_err(|e| launch::failed(LAUNCH_TARGET, "entry point could not be resolved", e))?;
        debug!(symbol = %entry, "Resolved entry point");
        let mut target = registry.target(LAUNCH_TARGET).ok_or_else(|| {
            launch::failed_without_cause(LAUNCH_TARGET, "no entry point is registered under this symbol")
        })?;

        let plugin = plugin
            .or(self.config.plugin.as_deref())
            .map(|symbol| {
                environment
                    .resolve(symbol)
                    .map_err(|e| launch::failed(symbol, "plugin could not be resolved", e))?;
                registry.plugin(symbol).ok_or_else(|| {
                    launch::failed_without_cause(symbol, "no plugin is registered under this symbol")
                })
            })
            .transpose()?;

        let ctx = LaunchContext {
            prelaunch: self,
            environment,
            cache_dir: self.directories.cache_dir(),
            config_dir: self.directories.config_dir(),
            mods_dir: self.directories.mods_dir(),
            discovery_locations,
            plugin,
        };
        target
            .launch(ctx)
            .map_err(|e| launch::failed(LAUNCH_TARGET, "entry point failed", e))
    }

    /// Run the remaining stages: extract, construct, invoke
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure.
    pub fn launch(
        &mut self,
        registry: &EntryRegistry,
        host: Option<Arc<dyn Resolver>>,
        discovery_locations: &[PathBuf],
        plugin: Option<&str>,
    ) -> Result<Environment> {
        self.extract_dependencies()?;
        let environment = self.construct_hierarchy(host)?;
        self.invoke_entry(registry, discovery_locations, plugin)?;
        Ok(environment)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn directories(&self) -> &Directories {
        &self.directories
    }

    pub fn config(&self) -> &PrelaunchConfig {
        &self.config
    }

    pub fn bundle(&self) -> Option<&Bundle> {
        self.bundle.as_ref()
    }

    /// Dependencies extracted so far, by logical name
    pub fn extracted(&self) -> &[(String, PathBuf)] {
        &self.extracted
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn log_forwarder(&self) -> Option<&LogForwarder> {
        self.log_forwarder.as_ref()
    }

    fn expect_stage(&mut self, expected: Stage, operation: &str) -> Result<()> {
        if self.stage == expected {
            return Ok(());
        }
        let err = launch::invalid_stage(operation, self.stage);
        self.stage = Stage::Failed;
        Err(err)
    }

    fn settle<T>(&mut self, result: Result<T>, next: Stage) -> Result<T> {
        self.stage = if result.is_ok() { next } else { Stage::Failed };
        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }
}

fn log_failure(err: &PrelaunchError) {
    tracing::error!(kind = %err.kind(), "{err}");
}

impl fmt::Debug for Prelaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prelaunch")
            .field("directories", &self.directories)
            .field("stage", &self.stage)
            .field("bundle", &self.bundle.as_ref().map(Bundle::path))
            .field("extracted", &self.extracted)
            .finish_non_exhaustive()
    }
}
