//! Symbol resolution for the isolated environment
//!
//! This module handles:
//! - Locations (directories and archives) that provide symbols
//! - Ordered namespaces of locations
//! - The priority-aware [`ResolutionHierarchy`] with its resolution cache
//! - The plain [`NamespaceResolver`] modelling the host environment
//!
//! Resolvers chain through `Arc<dyn Resolver>` delegates.

pub mod hierarchy;
pub mod location;
pub mod namespace;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

pub use hierarchy::{HierarchyBuilder, ResolutionHierarchy};
pub use location::{ArchiveLocation, DirectoryLocation, Location, location_from_path};
pub use namespace::{Namespace, NamespaceResolver};

/// A resolved symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    origin: String,
    entry: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>, origin: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            entry: entry.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location the symbol was found in
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Entry path inside the origin
    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}!/{})", self.name, self.origin, self.entry)
    }
}

/// Shared handle to a resolved symbol
pub type SymbolHandle = Arc<Symbol>;

/// Something that turns symbol names into handles
pub trait Resolver: Send + Sync + fmt::Debug {
    /// Resolve `name`
    ///
    /// # Errors
    ///
    /// Returns a resolution error if the symbol cannot be found.
    fn resolve(&self, name: &str) -> Result<SymbolHandle>;
}

/// Symbol-name prefixes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefixes(Vec<String>);

impl Prefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(prefixes.into_iter().map(Into::into).collect())
    }

    /// Whether `name` starts with any prefix
    pub fn matches(&self, name: &str) -> bool {
        self.0.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Append prefixes not already present
    pub fn extend<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !self.0.contains(&prefix) {
                self.0.push(prefix);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
