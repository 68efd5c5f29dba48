//! The isolated resolution hierarchy
//!
//! For every request the hierarchy decides, in this order:
//!
//! 1. excluded names are delegated, always
//! 2. cached names return the cached handle
//! 3. priority names resolve from the isolated namespace only (when it has
//!    at least one location); a miss is fatal
//! 4. everything else is delegated; delegate results are not cached
//!
//! Each locally resolved name owns a cache slot. First-time resolution runs
//! under that slot's own lock, never the map's shard lock, so concurrent
//! callers of one name share a single lookup and one handle while other
//! names proceed unblocked.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::namespace::Namespace;
use super::{Prefixes, Resolver, SymbolHandle};
use crate::error::{Result, resolution};

/// A resolver owning an isolated namespace plus an optional delegate
pub struct ResolutionHierarchy {
    namespace: Namespace,
    delegate: Option<Arc<dyn Resolver>>,
    priority: Prefixes,
    exclusions: Prefixes,
    cache: DashMap<String, Arc<Slot>>,
}

/// Cache slot for one name, empty until its first successful lookup
#[derive(Default)]
struct Slot {
    handle: OnceLock<SymbolHandle>,
    init: Mutex<()>,
}

impl Slot {
    fn get(&self) -> Option<SymbolHandle> {
        self.handle.get().map(Arc::clone)
    }

    fn get_or_try_init(&self, lookup: impl FnOnce() -> Result<SymbolHandle>) -> Result<SymbolHandle> {
        if let Some(handle) = self.get() {
            return Ok(handle);
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = self.get() {
            return Ok(handle);
        }
        let handle = lookup()?;
        Ok(Arc::clone(self.handle.get_or_init(|| handle)))
    }
}

impl ResolutionHierarchy {
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::default()
    }

    /// Whether the isolated namespace has any location
    pub fn is_strict(&self) -> bool {
        !self.namespace.is_empty()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn priority(&self) -> &Prefixes {
        &self.priority
    }

    pub fn exclusions(&self) -> &Prefixes {
        &self.exclusions
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Number of locally resolved symbols
    pub fn cached_len(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| entry.value().handle.get().is_some())
            .count()
    }

    /// Cached handle for `name`, without resolving
    pub fn cached(&self, name: &str) -> Option<SymbolHandle> {
        self.cache.get(name).and_then(|entry| entry.value().get())
    }

    fn delegate(&self, name: &str) -> Result<SymbolHandle> {
        match &self.delegate {
            Some(delegate) => {
                trace!(symbol = name, "Delegating resolution");
                delegate.resolve(name)
            }
            None => Err(resolution::not_found(name)),
        }
    }

    fn resolve_isolated(&self, name: &str) -> Result<SymbolHandle> {
        // The shard guard drops at the end of this statement.
        let slot = Arc::clone(self.cache.entry(name.to_string()).or_default().value());

        slot.get_or_try_init(|| match self.namespace.find(name)? {
            Some(symbol) => {
                debug!(symbol = name, location = %symbol.origin(), "Resolved isolated symbol");
                Ok(Arc::new(symbol))
            }
            None => Err(resolution::isolated_missing(name)),
        })
    }
}

impl Resolver for ResolutionHierarchy {
    fn resolve(&self, name: &str) -> Result<SymbolHandle> {
        if self.exclusions.matches(name) {
            return self.delegate(name);
        }

        if let Some(handle) = self.cached(name) {
            return Ok(handle);
        }

        if self.is_strict() && self.priority.matches(name) {
            return self.resolve_isolated(name);
        }

        self.delegate(name)
    }
}

impl fmt::Debug for ResolutionHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionHierarchy")
            .field("namespace", &self.namespace)
            .field("has_delegate", &self.delegate.is_some())
            .field("priority", &self.priority)
            .field("exclusions", &self.exclusions)
            .field("cached", &self.cached_len())
            .finish()
    }
}

/// Builder for [`ResolutionHierarchy`]
#[derive(Default)]
pub struct HierarchyBuilder {
    namespace: Namespace,
    delegate: Option<Arc<dyn Resolver>>,
    priority: Prefixes,
    exclusions: Prefixes,
}

impl HierarchyBuilder {
    #[must_use]
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    #[must_use]
    pub fn delegate(mut self, delegate: Option<Arc<dyn Resolver>>) -> Self {
        self.delegate = delegate;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Prefixes) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn exclusions(mut self, exclusions: Prefixes) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn build(self) -> ResolutionHierarchy {
        ResolutionHierarchy {
            namespace: self.namespace,
            delegate: self.delegate,
            priority: self.priority,
            exclusions: self.exclusions,
            cache: DashMap::new(),
        }
    }
}
