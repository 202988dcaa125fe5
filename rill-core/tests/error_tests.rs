// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::StreamError;

#[derive(Debug, thiserror::Error)]
#[error("custom failure: {message}")]
struct CustomError {
    message: String,
}

#[test]
fn test_stream_error_display() {
    let error = StreamError::stream_error("window produce failed");
    assert_eq!(
        error.to_string(),
        "stream processing error: window produce failed"
    );
}

#[test]
fn test_user_error_wraps_source() {
    let error = StreamError::user_error(CustomError {
        message: "bad input".to_string(),
    });
    assert_eq!(error.to_string(), "user error: custom failure: bad input");

    let source = std::error::Error::source(&error);
    assert!(source.is_some());
}

#[test]
fn test_stream_error_is_cheap_to_clone() {
    // A single emission fans out to many subscribers; the user payload is
    // shared, not re-boxed, by each clone.
    let error = StreamError::user_error(CustomError {
        message: "shared".to_string(),
    });
    let clone = error.clone();
    assert_eq!(error.to_string(), clone.to_string());
}

#[test]
fn test_result_alias() {
    fn fallible(fail: bool) -> rill_core::Result<i32> {
        if fail {
            Err(StreamError::stream_error("requested failure"))
        } else {
            Ok(5)
        }
    }

    assert_eq!(fallible(false).unwrap(), 5);
    assert!(fallible(true).is_err());
}
