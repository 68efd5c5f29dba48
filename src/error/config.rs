//! Configuration errors

use super::PrelaunchError;

/// Creates a missing dependency declaration error
pub fn dependency_not_declared(name: impl Into<String>) -> PrelaunchError {
    PrelaunchError::DependencyNotDeclared { name: name.into() }
}

/// Creates a missing bundle entry error
pub fn entry_missing(name: impl Into<String>, entry: impl Into<String>) -> PrelaunchError {
    PrelaunchError::BundleEntryMissing {
        name: name.into(),
        entry: entry.into(),
    }
}

/// Creates an invalid bundle error
pub fn bundle_invalid(path: impl Into<String>, reason: impl Into<String>) -> PrelaunchError {
    PrelaunchError::BundleInvalid {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for two dependencies sharing one destination file
pub fn dependency_collision(
    first: impl Into<String>,
    second: impl Into<String>,
    path: &std::path::Path,
) -> PrelaunchError {
    PrelaunchError::DependencyCollision {
        first: first.into(),
        second: second.into(),
        path: path.display().to_string(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PrelaunchError {
    PrelaunchError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PrelaunchError {
    PrelaunchError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PrelaunchError {
    PrelaunchError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
