// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{ConfluxError, Emission};

#[derive(Debug, thiserror::Error)]
#[error("custom failure: {message}")]
struct CustomError {
    message: String,
}

#[test]
fn source_error_formats_context() {
    let error = ConfluxError::source_error("stream closed mid-request");
    assert_eq!(error.to_string(), "Source error: stream closed mid-request");
    assert!(error.is_source_error());
    assert!(!error.is_release_error());
}

#[test]
fn release_error_formats_context() {
    let error = ConfluxError::release_error("socket already gone");
    assert_eq!(error.to_string(), "Release error: socket already gone");
    assert!(error.is_release_error());
}

#[test]
fn user_error_preserves_the_source() {
    let error = ConfluxError::user_error(CustomError {
        message: "bad input".to_string(),
    });
    assert_eq!(error.to_string(), "User error: custom failure: bad input");
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn cloning_a_user_error_degrades_to_its_message() {
    let error = ConfluxError::user_error(CustomError {
        message: "bad input".to_string(),
    });

    let cloned = error.clone();

    assert!(cloned.is_source_error());
    assert!(cloned.to_string().contains("custom failure: bad input"));
}

#[test]
fn emission_accessors() {
    let value: Emission<i32> = Emission::Value(7);
    assert!(value.is_value());
    assert_eq!(value.clone().ok(), Some(7));
    assert_eq!(value.map(|v| v * 2).unwrap(), 14);

    let error: Emission<i32> = Emission::Error(ConfluxError::source_error("boom"));
    assert!(error.is_error());
    assert!(error.clone().ok().is_none());
    assert!(error.err().is_some());
}

#[test]
fn emissions_convert_to_and_from_results() {
    let ok: Result<i32, ConfluxError> = Emission::Value(3).into();
    assert_eq!(ok.unwrap(), 3);

    let emission: Emission<i32> = Err(ConfluxError::source_error("boom")).into();
    assert!(emission.is_error());
}

#[test]
fn errors_never_compare_equal() {
    let a: Emission<i32> = Emission::Error(ConfluxError::source_error("same"));
    let b: Emission<i32> = Emission::Error(ConfluxError::source_error("same"));
    assert_ne!(a, b);
    assert_eq!(Emission::Value(1), Emission::Value(1));
    assert_ne!(Emission::Value(1), Emission::Value(2));
}
