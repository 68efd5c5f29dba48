//! Ordered location sets and the host namespace resolver

use std::path::PathBuf;
use std::sync::Arc;

use tracing::trace;

use super::location::{Location, location_from_path};
use super::{Resolver, Symbol, SymbolHandle};
use crate::error::{Result, resolution};

/// Ordered list of locations. The first location providing a symbol wins.
#[derive(Debug, Default)]
pub struct Namespace {
    locations: Vec<Box<dyn Location>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open each path as a directory or archive location, keeping order
    ///
    /// # Errors
    ///
    /// Returns a resolution error if any path cannot be opened.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let locations = paths
            .iter()
            .map(|path| location_from_path(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { locations })
    }

    pub fn push(&mut self, location: Box<dyn Location>) {
        self.locations.push(location);
    }

    #[must_use]
    pub fn with(mut self, location: impl Location + 'static) -> Self {
        self.push(Box::new(location));
        self
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn describe(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.describe()).collect()
    }

    /// Search the locations in order
    ///
    /// # Errors
    ///
    /// Propagates the first location failure.
    pub fn find(&self, symbol: &str) -> Result<Option<Symbol>> {
        for location in &self.locations {
            if let Some(found) = location.find(symbol)? {
                trace!(symbol, location = %found.origin(), "Found symbol");
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Plain resolver over a namespace: no isolation, no cache.
///
/// Models the enclosing host environment a hierarchy delegates to.
#[derive(Debug, Default)]
pub struct NamespaceResolver {
    namespace: Namespace,
}

impl NamespaceResolver {
    pub fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

impl Resolver for NamespaceResolver {
    fn resolve(&self, name: &str) -> Result<SymbolHandle> {
        self.namespace
            .find(name)?
            .map(Arc::new)
            .ok_or_else(|| resolution::not_found(name))
    }
}
