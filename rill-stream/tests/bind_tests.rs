// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Stream, StreamError, StreamValue};
use rill_stream::{BindExt, SourceStream};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_bind_result_only_sees_values() {
    // Arrange
    let seen = Rc::new(RefCell::new(Vec::new()));
    let source = SourceStream::from_events([
        StreamValue::Result(1),
        StreamValue::Error(StreamError::stream_error("ignored here")),
        StreamValue::Result(2),
        StreamValue::Completed,
    ])
    .bind_result({
        let seen = seen.clone();
        move |v: &i32| seen.borrow_mut().push(*v)
    });

    // Act
    source.start();

    // Assert
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn test_bind_error_only_sees_errors() {
    // Arrange
    let messages = Rc::new(RefCell::new(Vec::new()));
    let source = SourceStream::from_events([
        StreamValue::Result(1),
        StreamValue::Error(StreamError::stream_error("first")),
        StreamValue::Error(StreamError::stream_error("second")),
    ])
    .bind_error({
        let messages = messages.clone();
        move |e: &StreamError| messages.borrow_mut().push(e.to_string())
    });

    // Act
    source.start();

    // Assert
    assert_eq!(
        *messages.borrow(),
        vec![
            "stream processing error: first".to_string(),
            "stream processing error: second".to_string(),
        ]
    );
}

#[test]
fn test_bind_does_not_start_the_stream() {
    // Arrange
    let seen = Rc::new(RefCell::new(Vec::new()));

    // Act
    let source = SourceStream::from_values([1]).bind_result({
        let seen = seen.clone();
        move |v: &i32| seen.borrow_mut().push(*v)
    });

    // Assert
    assert!(!source.started());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_bindings_stack_on_one_node() {
    // Arrange
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));
    let source = SourceStream::from_values([1, 2])
        .bind_result({
            let first = first.clone();
            move |v: &i32| first.borrow_mut().push(*v)
        })
        .bind_result({
            let second = second.clone();
            move |v: &i32| second.borrow_mut().push(*v * 10)
        });

    // Act
    source.start();

    // Assert
    assert_eq!(*first.borrow(), vec![1, 2]);
    assert_eq!(*second.borrow(), vec![10, 20]);
}
