// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Origin node for stream graphs.
//!
//! A [`SourceStream`] either replays a fixed sequence of events synchronously
//! during [`start`](rill_core::Stream::start), or sits armed and forwards
//! whatever the caller pushes through [`emit`](SourceStream::emit). It is the
//! entry point for driving values into a pipeline of combinators.

use rill_core::{Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct SourceInner<T> {
    started: Cell<bool>,
    output: StreamBinding<T>,
    pending: RefCell<Vec<StreamValue<T>>>,
}

/// An origin stream node.
///
/// Fixed-sequence sources emit each element as a `Result`, in order, during
/// `start`; they do not append a `Completed` sentinel unless one was part of
/// the constructed sequence (see [`from_events`](Self::from_events)).
/// Externally driven sources emit nothing at `start` and produce events at
/// whatever times the caller invokes [`emit`](Self::emit).
///
/// Handles are cheap clones sharing one underlying node.
///
/// # Examples
///
/// ```
/// use rill_core::{Stream, StreamValue};
/// use rill_stream::SourceStream;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let source = SourceStream::from_values(["hello", "world!"]);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// source.output().add_action("test", {
///     let seen = seen.clone();
///     move |value| {
///         if let StreamValue::Result(v) = value {
///             seen.borrow_mut().push(*v);
///         }
///     }
/// });
///
/// source.start();
/// assert_eq!(*seen.borrow(), vec!["hello", "world!"]);
/// ```
pub struct SourceStream<T> {
    inner: Rc<SourceInner<T>>,
}

impl<T: 'static> SourceStream<T> {
    /// Creates an empty, externally driven source.
    ///
    /// `start` only arms the node; values arrive through [`emit`](Self::emit)
    /// or [`emit_value`](Self::emit_value).
    #[must_use]
    pub fn new() -> Self {
        Self::from_events([])
    }

    /// Creates a source that replays `values` as `Result`s during `start`.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::from_events(values.into_iter().map(StreamValue::Result))
    }

    /// Creates a source that replays raw `StreamValue` events during `start`.
    ///
    /// Useful to end a fixed sequence with an explicit `Completed`:
    ///
    /// ```
    /// use rill_core::StreamValue;
    /// use rill_stream::SourceStream;
    ///
    /// let source = SourceStream::from_events([
    ///     StreamValue::Result(1),
    ///     StreamValue::Result(2),
    ///     StreamValue::Completed,
    /// ]);
    /// ```
    pub fn from_events(events: impl IntoIterator<Item = StreamValue<T>>) -> Self {
        Self {
            inner: Rc::new(SourceInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                pending: RefCell::new(events.into_iter().collect()),
            }),
        }
    }

    /// Pushes a raw event to all current subscribers.
    ///
    /// Emission is immediate and synchronous. Events pushed before `start`
    /// reach only subscribers registered at that point; combinators attach to
    /// their parents during `start`, so drive the source after starting the
    /// terminal node.
    pub fn emit(&self, value: StreamValue<T>) {
        self.inner.output.emit(value);
    }

    /// Pushes a produced value to all current subscribers.
    pub fn emit_value(&self, value: T) {
        self.emit(StreamValue::Result(value));
    }
}

impl<T: Clone + 'static> SourceStream<T> {
    /// Creates a source that replays `value` `count` times.
    pub fn repeat(value: T, count: usize) -> Self {
        Self::from_values(std::iter::repeat(value).take(count))
    }
}

impl SourceStream<i32> {
    /// Creates a source counting `count` integers upward from `start`.
    ///
    /// `counter(1, 4)` replays `1, 2, 3, 4`. Values wrap on `i32` overflow.
    #[must_use]
    pub fn counter(start: i32, count: u32) -> Self {
        Self::from_values((0..count).map(move |i| start.wrapping_add_unsigned(i)))
    }
}

impl<T: 'static> Stream for SourceStream<T> {
    type Output = T;

    fn started(&self) -> bool {
        self.inner.started.get()
    }

    fn output(&self) -> &StreamBinding<T> {
        &self.inner.output
    }

    fn start(&self) {
        if self.inner.started.replace(true) {
            return;
        }
        let pending = std::mem::take(&mut *self.inner.pending.borrow_mut());
        for event in pending {
            self.inner.output.emit(event);
        }
    }
}

impl<T: 'static> Default for SourceStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SourceStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
