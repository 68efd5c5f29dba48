//! Extraction errors

use std::path::Path;

use super::PrelaunchError;

/// Creates an extraction failed error carrying the I/O cause
pub fn failed(name: impl Into<String>, path: &Path, source: std::io::Error) -> PrelaunchError {
    PrelaunchError::ExtractionFailed {
        name: name.into(),
        path: path.display().to_string(),
        source,
    }
}

/// Creates a checksum mismatch error
pub fn checksum_mismatch(
    name: impl Into<String>,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> PrelaunchError {
    PrelaunchError::ChecksumMismatch {
        name: name.into(),
        expected: expected.into(),
        actual: actual.into(),
    }
}
