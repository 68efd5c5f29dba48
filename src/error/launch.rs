//! Launch errors

use super::{BoxedCause, PrelaunchError};

/// Creates a launch failure wrapping the underlying cause
pub fn failed(
    target: impl Into<String>,
    message: impl Into<String>,
    source: impl Into<BoxedCause>,
) -> PrelaunchError {
    PrelaunchError::LaunchFailed {
        target: target.into(),
        message: message.into(),
        source: Some(source.into()),
    }
}

/// Creates a launch failure without an underlying cause
pub fn failed_without_cause(
    target: impl Into<String>,
    message: impl Into<String>,
) -> PrelaunchError {
    PrelaunchError::LaunchFailed {
        target: target.into(),
        message: message.into(),
        source: None,
    }
}

/// Creates an out-of-order stage error
pub fn invalid_stage(operation: impl Into<String>, stage: impl ToString) -> PrelaunchError {
    PrelaunchError::InvalidStage {
        operation: operation.into(),
        stage: stage.to_string(),
    }
}

/// Creates a duplicate entry point registration error
pub fn duplicate_entry(symbol: impl Into<String>) -> PrelaunchError {
    PrelaunchError::DuplicateEntryPoint {
        symbol: symbol.into(),
    }
}
