// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::StreamValue;
use std::cell::RefCell;
use std::rc::Rc;

/// Accumulates the `Result` payloads a stream emits.
///
/// The engine is push-based and synchronous, so tests register a collector
/// callback via `bind_result`, drive the pipeline, and then assert on the
/// captured values.
pub struct Collector<T> {
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Collector<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a callback suitable for `bind_result`.
    pub fn push_fn(&self) -> impl Fn(&T) + 'static {
        let values = self.values.clone();
        move |value| values.borrow_mut().push(value.clone())
    }

    /// Snapshot of every collected value, in emission order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.values.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl<T: Clone + 'static> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A simplified, comparable record of one emission.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded<T> {
    /// A produced value
    Result(T),
    /// An error, captured by display string
    Error(String),
    /// The completion sentinel
    Completed,
}

impl<T: Clone> Recorded<T> {
    fn from_value(value: &StreamValue<T>) -> Self {
        match value {
            StreamValue::Result(v) => Recorded::Result(v.clone()),
            StreamValue::Error(e) => Recorded::Error(e.to_string()),
            StreamValue::Completed => Recorded::Completed,
        }
    }
}

/// Records the full tri-state event sequence a binding emits.
///
/// Use this instead of [`Collector`] when a test must assert on the relative
/// order of `Result`, `Error`, and `Completed` events.
pub struct EventRecorder<T> {
    events: Rc<RefCell<Vec<Recorded<T>>>>,
}

impl<T: Clone + 'static> EventRecorder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a callback suitable for raw `add_action` registration.
    pub fn record_fn(&self) -> impl Fn(&StreamValue<T>) + 'static {
        let events = self.events.clone();
        move |value| events.borrow_mut().push(Recorded::from_value(value))
    }

    /// Snapshot of every recorded event, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<Recorded<T>> {
        self.events.borrow().clone()
    }

    /// Number of recorded `Error` events.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Recorded::Error(_)))
            .count()
    }
}

impl<T: Clone + 'static> Default for EventRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
