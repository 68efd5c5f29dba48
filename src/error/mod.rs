//! Error types and handling for prelaunch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Missing or invalid bundle declarations and configuration
//! - [`extraction`]: Failures while materializing dependency payloads
//! - [`resolution`]: Symbol resolution failures
//! - [`launch`]: Failures resolving, instantiating or invoking the next stage
//!
//! Every bootstrap error is terminal. [`PrelaunchError::kind`] maps each
//! variant onto the error taxonomy so callers can report it without matching
//! on individual variants.

pub mod config;
pub mod extraction;
pub mod launch;
pub mod resolution;

#[cfg(test)]
mod tests;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error used to carry causes raised by next-stage code
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for prelaunch operations
#[derive(Error, Diagnostic, Debug)]
pub enum PrelaunchError {
    // Configuration errors
    #[error("Required dependency '{name}' is not declared in the bundle manifest")]
    #[diagnostic(
        code(prelaunch::config::dependency_not_declared),
        help("Declare it with an 'Additional-Dependencies-{name}' manifest attribute")
    )]
    DependencyNotDeclared { name: String },

    #[error("Bundle entry '{entry}' declared for dependency '{name}' does not exist")]
    #[diagnostic(
        code(prelaunch::config::entry_missing),
        help("The bundle is corrupt or was packaged without its dependency payloads")
    )]
    BundleEntryMissing { name: String, entry: String },

    #[error("Invalid bundle {path}: {reason}")]
    #[diagnostic(code(prelaunch::config::bundle_invalid))]
    BundleInvalid { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(prelaunch::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Dependencies '{first}' and '{second}' both extract to {path}")]
    #[diagnostic(
        code(prelaunch::config::dependency_collision),
        help("Give the embedded payloads distinct file names")
    )]
    DependencyCollision {
        first: String,
        second: String,
        path: String,
    },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(prelaunch::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(prelaunch::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Extraction errors
    #[error("Failed to extract required dependency '{name}' to {path}")]
    #[diagnostic(
        code(prelaunch::extraction::failed),
        help("Check free space and permissions of the dependency directory")
    )]
    ExtractionFailed {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Checksum mismatch for dependency '{name}': expected {expected}, got {actual}")]
    #[diagnostic(code(prelaunch::extraction::checksum_mismatch))]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    // Resolution errors
    #[error("Symbol '{symbol}' must resolve from the isolated namespace but no location provides it")]
    #[diagnostic(
        code(prelaunch::resolution::isolated_missing),
        help("The bundle or one of its dependency payloads is missing this symbol")
    )]
    IsolatedSymbolMissing { symbol: String },

    #[error("Symbol '{symbol}' not found")]
    #[diagnostic(code(prelaunch::resolution::not_found))]
    SymbolNotFound { symbol: String },

    #[error("Failed to read namespace location {location}")]
    #[diagnostic(code(prelaunch::resolution::location_unreadable))]
    LocationUnreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    // Launch errors
    #[error("Failed to launch '{target}': {message}")]
    #[diagnostic(code(prelaunch::launch::failed))]
    LaunchFailed {
        target: String,
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Bootstrap cannot {operation} while in stage {stage}")]
    #[diagnostic(
        code(prelaunch::launch::invalid_stage),
        help("Bootstrap stages run once, in order: open, extract, construct, invoke")
    )]
    InvalidStage { operation: String, stage: String },

    #[error("Entry point '{symbol}' is already registered")]
    #[diagnostic(code(prelaunch::launch::duplicate_entry))]
    DuplicateEntryPoint { symbol: String },

    // Operator errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(prelaunch::cache::operation_failed))]
    CacheOperationFailed { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(prelaunch::fs::io_error))]
    IoError { message: String },
}

/// Error taxonomy shared by every bootstrap failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid manifest declarations and configuration
    Configuration,
    /// I/O failure while materializing a dependency
    Extraction,
    /// A symbol could not be resolved
    Resolution,
    /// The next stage could not be resolved, instantiated or invoked
    Launch,
    /// Operator-facing filesystem failures outside the bootstrap path
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Extraction => "extraction",
            Self::Resolution => "resolution",
            Self::Launch => "launch",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

impl PrelaunchError {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DependencyNotDeclared { .. }
            | Self::BundleEntryMissing { .. }
            | Self::BundleInvalid { .. }
            | Self::DependencyCollision { .. }
            | Self::ConfigInvalid { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigReadFailed { .. } => ErrorKind::Configuration,
            Self::ExtractionFailed { .. } | Self::ChecksumMismatch { .. } => ErrorKind::Extraction,
            Self::IsolatedSymbolMissing { .. }
            | Self::SymbolNotFound { .. }
            | Self::LocationUnreadable { .. } => ErrorKind::Resolution,
            Self::LaunchFailed { .. }
            | Self::InvalidStage { .. }
            | Self::DuplicateEntryPoint { .. } => ErrorKind::Launch,
            Self::CacheOperationFailed { .. } | Self::IoError { .. } => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for PrelaunchError {
    fn from(err: std::io::Error) -> Self {
        PrelaunchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PrelaunchError {
    fn from(err: serde_yaml::Error) -> Self {
        PrelaunchError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PrelaunchError>;
