// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::Stream;
use rill_stream::{BindExt, FilterExt, SourceStream};
use rill_test_utils::{fail_on_error, Collector};

#[test]
fn test_filter_keeps_matching_values() {
    // Arrange
    let collector = Collector::new();
    let filtered = fail_on_error(
        SourceStream::from_values([
            "wow!".to_string(),
            "no".to_string(),
            "cool!".to_string(),
            "nah".to_string(),
            "awesome!".to_string(),
        ])
        .filter(|s| Ok(s.ends_with('!'))),
    )
    .bind_result(collector.push_fn());

    // Act
    filtered.start();

    // Assert
    assert_eq!(
        collector.values(),
        vec![
            "wow!".to_string(),
            "cool!".to_string(),
            "awesome!".to_string()
        ]
    );
}

#[test]
fn test_filter_suppresses_everything_when_predicate_is_false() {
    // Arrange
    let collector = Collector::new();
    let filtered = SourceStream::from_values([1, 2, 3])
        .filter(|_| Ok(false))
        .bind_result(collector.push_fn());

    // Act
    filtered.start();

    // Assert
    assert!(collector.is_empty());
}

#[test]
fn test_filter_start_is_idempotent() {
    // Arrange
    let collector = Collector::new();
    let filtered = SourceStream::from_values([2, 3, 4])
        .filter(|n| Ok(n % 2 == 0))
        .bind_result(collector.push_fn());

    // Act
    filtered.start();
    filtered.start();

    // Assert
    assert_eq!(collector.values(), vec![2, 4]);
    assert!(filtered.started());
}

#[test]
fn test_filter_sees_values_pushed_after_start() {
    // Arrange
    let collector = Collector::new();
    let source = SourceStream::new();
    let filtered = source
        .clone()
        .filter(|n: &i32| Ok(*n > 10))
        .bind_result(collector.push_fn());
    filtered.start();

    // Act
    source.emit_value(5);
    source.emit_value(15);
    source.emit_value(25);

    // Assert
    assert_eq!(collector.values(), vec![15, 25]);
}
