// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Stream, StreamError, StreamValue};
use rill_stream::{MergeWithExt, SourceStream};
use rill_test_utils::{EventRecorder, Recorded};

#[test]
fn test_transform_error_is_contained() {
    // Arrange
    let recorder = EventRecorder::new();
    let left = SourceStream::new();
    let right = SourceStream::new();
    let merged = left.clone().merge_with(right.clone(), |a: &i32, b: &i32| {
        if *a == 2 {
            Err(StreamError::stream_error("bad left value"))
        } else {
            Ok(a + b)
        }
    });
    merged.output().add_action("recorder", recorder.record_fn());
    merged.start();

    // Act
    left.emit_value(1);
    left.emit_value(2);
    right.emit_value(10);
    left.emit_value(3);

    // Assert: the failing combination still updated the cache slot
    assert_eq!(
        recorder.events(),
        vec![
            Recorded::Result(1),
            Recorded::Error("stream processing error: bad left value".to_string()),
            Recorded::Error("stream processing error: bad left value".to_string()),
            Recorded::Result(13),
        ]
    );
}

#[test]
fn test_one_parent_completing_surfaces_immediately() {
    // Arrange
    let recorder = EventRecorder::new();
    let left = SourceStream::new();
    let right = SourceStream::new();
    let merged = left
        .clone()
        .merge_with(right.clone(), |a: &i32, b: &i32| Ok(a + b));
    merged.output().add_action("recorder", recorder.record_fn());
    merged.start();

    // Act
    left.emit_value(5);
    left.emit(StreamValue::Completed);
    // The completed parent's slot is back at the default.
    right.emit_value(1);

    // Assert
    assert_eq!(
        recorder.events(),
        vec![
            Recorded::Result(5),
            Recorded::Completed,
            Recorded::Result(1),
        ]
    );
}

#[test]
fn test_parent_error_surfaces_and_resets_its_slot() {
    // Arrange
    let recorder = EventRecorder::new();
    let left = SourceStream::new();
    let right = SourceStream::new();
    let merged = left
        .clone()
        .merge_with(right.clone(), |a: &i32, b: &i32| Ok(a + b));
    merged.output().add_action("recorder", recorder.record_fn());
    merged.start();

    // Act
    left.emit_value(7);
    left.emit(StreamValue::Error(StreamError::stream_error("left broke")));
    right.emit_value(2);

    // Assert
    assert_eq!(
        recorder.events(),
        vec![
            Recorded::Result(7),
            Recorded::Error("stream processing error: left broke".to_string()),
            Recorded::Result(2),
        ]
    );
}
