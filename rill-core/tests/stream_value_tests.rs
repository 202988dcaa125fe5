// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{StreamError, StreamValue};

#[test]
fn test_stream_value_result_creation() {
    let value: StreamValue<i32> = StreamValue::Result(42);
    assert!(value.is_result());
    assert!(!value.is_error());
    assert!(!value.is_completed());
}

#[test]
fn test_stream_value_error_creation() {
    let value: StreamValue<i32> = StreamValue::Error(StreamError::stream_error("test error"));
    assert!(!value.is_result());
    assert!(value.is_error());
    assert!(!value.is_completed());
}

#[test]
fn test_stream_value_completed_creation() {
    let value: StreamValue<i32> = StreamValue::Completed;
    assert!(!value.is_result());
    assert!(!value.is_error());
    assert!(value.is_completed());
}

#[test]
fn test_stream_value_ok_extracts_result() {
    let value = StreamValue::Result(42);
    assert_eq!(value.ok(), Some(42));
}

#[test]
fn test_stream_value_ok_discards_error_and_completed() {
    let error: StreamValue<i32> = StreamValue::Error(StreamError::stream_error("test"));
    assert_eq!(error.ok(), None);

    let completed: StreamValue<i32> = StreamValue::Completed;
    assert_eq!(completed.ok(), None);
}

#[test]
fn test_stream_value_err_extracts_error() {
    let value: StreamValue<i32> = StreamValue::Error(StreamError::stream_error("test error"));
    assert!(value.err().is_some());
}

#[test]
fn test_stream_value_err_discards_result() {
    let value = StreamValue::Result(42);
    assert!(value.err().is_none());
}

#[test]
fn test_stream_value_as_result_borrows() {
    let value = StreamValue::Result(String::from("payload"));
    assert_eq!(value.as_result().map(String::as_str), Some("payload"));
    assert!(value.is_result()); // not consumed
}

#[test]
fn test_stream_value_map_transforms_result() {
    let value = StreamValue::Result(5);
    let mapped = value.map(|x| x * 2);
    assert_eq!(mapped.ok(), Some(10));
}

#[test]
fn test_stream_value_map_propagates_error_and_completed() {
    let error: StreamValue<i32> = StreamValue::Error(StreamError::stream_error("test"));
    assert!(error.map(|x| x * 2).is_error());

    let completed: StreamValue<i32> = StreamValue::Completed;
    assert!(completed.map(|x| x * 2).is_completed());
}

#[test]
fn test_stream_value_equality() {
    assert_eq!(StreamValue::Result(1), StreamValue::Result(1));
    assert_ne!(StreamValue::Result(1), StreamValue::Result(2));
    assert_eq!(StreamValue::<i32>::Completed, StreamValue::<i32>::Completed);
    assert_ne!(StreamValue::Result(1), StreamValue::Completed);

    // Errors are never equal, not even to themselves
    let error: StreamValue<i32> = StreamValue::Error(StreamError::stream_error("test"));
    assert_ne!(error.clone(), error);
}

#[test]
fn test_stream_value_from_result() {
    let ok: StreamValue<i32> = Ok(7).into();
    assert_eq!(ok.ok(), Some(7));

    let err: StreamValue<i32> = Err(StreamError::stream_error("boom")).into();
    assert!(err.is_error());
}

#[test]
fn test_stream_value_unwrap_returns_result() {
    assert_eq!(StreamValue::Result(3).unwrap(), 3);
}

#[test]
#[should_panic(expected = "called `StreamValue::unwrap()` on a `Completed` value")]
fn test_stream_value_unwrap_panics_on_completed() {
    let value: StreamValue<i32> = StreamValue::Completed;
    value.unwrap();
}
