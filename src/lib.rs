//! Prelaunch - isolated runtime bootstrap
//!
//! Bootstraps a secondary runtime inside a host process:
//!
//! - [`cache::DependencyExtractor`] copies the dependencies a host bundle
//!   declares in its manifest into a persistent directory
//! - [`resolver::ResolutionHierarchy`] resolves symbols from an isolated
//!   namespace with a parent-last policy for configured prefixes
//! - [`bootstrap::Prelaunch`] sequences the stages and hands off to the
//!   versioned entry point registered in a [`bootstrap::EntryRegistry`]

pub mod bootstrap;
pub mod bundle;
pub mod cache;
pub mod config;
pub mod error;
pub mod hash;
pub mod logging;
pub mod path_utils;
pub mod resolver;

#[cfg(test)]
mod test_fixtures;
