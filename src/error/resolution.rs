//! Resolution errors

use super::PrelaunchError;

/// Creates an error for a priority symbol absent from the isolated namespace
pub fn isolated_missing(symbol: impl Into<String>) -> PrelaunchError {
    PrelaunchError::IsolatedSymbolMissing {
        symbol: symbol.into(),
    }
}

/// Creates a symbol not found error
pub fn not_found(symbol: impl Into<String>) -> PrelaunchError {
    PrelaunchError::SymbolNotFound {
        symbol: symbol.into(),
    }
}

/// Creates an unreadable location error
pub fn location_unreadable(location: impl Into<String>, source: std::io::Error) -> PrelaunchError {
    PrelaunchError::LocationUnreadable {
        location: location.into(),
        source,
    }
}
