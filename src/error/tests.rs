//! Error type tests
//!
//! Tests for `PrelaunchError`, its taxonomy and its conversions.

#![allow(clippy::expect_used)]

use std::error::Error;

use miette::Diagnostic;

use super::{ErrorKind, PrelaunchError, config, extraction, launch, resolution};

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = config::dependency_not_declared("Runtime");
    assert_eq!(
        err.to_string(),
        "Required dependency 'Runtime' is not declared in the bundle manifest"
    );
}

#[test]
fn test_error_code() {
    let err = resolution::isolated_missing("pkg.iso.Missing");
    assert_eq!(
        err.code()
            .map(|c: Box<dyn std::fmt::Display>| c.to_string()),
        Some("prelaunch::resolution::isolated_missing".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PrelaunchError = io_err.into();
    assert!(matches!(err, PrelaunchError::IoError { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let err: PrelaunchError = parse_result.expect_err("yaml must fail").into();
    assert!(matches!(err, PrelaunchError::ConfigParseFailed { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_configuration_kinds() {
    assert_eq!(
        config::dependency_not_declared("Foo").kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        config::entry_missing("Foo", "lib/foo.bin").kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        config::bundle_invalid("/tmp/b.tar", "no manifest").kind(),
        ErrorKind::Configuration
    );
    assert_eq!(config::invalid("empty").kind(), ErrorKind::Configuration);
    assert_eq!(
        config::dependency_collision("A", "B", std::path::Path::new("/deps/core.bin")).kind(),
        ErrorKind::Configuration
    );
}

#[test]
fn test_extraction_failed_preserves_cause() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let err = extraction::failed("Foo", std::path::Path::new("/deps/foo.bin"), io_err);
    assert_eq!(err.kind(), ErrorKind::Extraction);
    let cause = err.source().expect("extraction error keeps its cause");
    assert!(cause.to_string().contains("read-only"));
}

#[test]
fn test_launch_failed_wraps_resolution_error() {
    let inner = resolution::not_found("prelaunch.launch.v1.Launch");
    let err = launch::failed("prelaunch.launch.v1.Launch", "entry point not found", inner);
    assert_eq!(err.kind(), ErrorKind::Launch);

    let cause = err.source().expect("launch error keeps its cause");
    let inner = cause
        .downcast_ref::<PrelaunchError>()
        .expect("cause is a PrelaunchError");
    assert_eq!(inner.kind(), ErrorKind::Resolution);
}

#[test]
fn test_launch_failed_without_cause() {
    let err = launch::failed_without_cause("target", "no factory");
    assert!(err.source().is_none());
}

#[test]
fn test_invalid_stage_kind() {
    let err = launch::invalid_stage("extract dependencies", "entry-invoked");
    assert_eq!(err.kind(), ErrorKind::Launch);
    assert!(err.to_string().contains("entry-invoked"));
}

test_error_contains!(
    test_entry_missing_error,
    config::entry_missing("Foo", "lib/foo.bin"),
    "lib/foo.bin",
    "Foo"
);

test_error_contains!(
    test_parse_failed_error_shows_reason,
    config::parse_failed("/game/config/prelaunch.yaml", "unknown field `colour`"),
    "prelaunch.yaml",
    "unknown field `colour`"
);

test_error_contains!(
    test_read_failed_error_shows_reason,
    config::read_failed("/game/config/prelaunch.yaml", "permission denied"),
    "prelaunch.yaml",
    "permission denied"
);

test_error_contains!(
    test_dependency_collision_error,
    config::dependency_collision("A", "B", std::path::Path::new("/deps/core.bin")),
    "'A'",
    "'B'",
    "/deps/core.bin"
);

test_error_contains!(
    test_checksum_mismatch_error,
    extraction::checksum_mismatch("Foo", "abc", "def"),
    "Checksum mismatch",
    "abc",
    "def"
);

test_error_contains!(
    test_symbol_not_found_error,
    resolution::not_found("other.Thing"),
    "other.Thing"
);

test_error_contains!(
    test_duplicate_entry_error,
    launch::duplicate_entry("prelaunch.launch.v1.Launch"),
    "already registered"
);

#[test]
fn test_error_kind_display() {
    assert_eq!(ErrorKind::Configuration.to_string(), "configuration");
    assert_eq!(ErrorKind::Resolution.to_string(), "resolution");
}
