// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, Result, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::Cell;
use std::rc::Rc;

type Predicate<T> = dyn Fn(&T) -> Result<bool>;

struct FilterInner<T> {
    started: Cell<bool>,
    output: StreamBinding<T>,
    parent: SharedStream<T>,
    predicate: Box<Predicate<T>>,
    key: String,
}

impl<T: Clone + 'static> FilterInner<T> {
    fn on_parent_value(&self, value: &StreamValue<T>) {
        match value {
            StreamValue::Result(v) => match (self.predicate)(v) {
                Ok(true) => self.output.emit(StreamValue::Result(v.clone())),
                Ok(false) => {}
                Err(e) => self.output.emit(StreamValue::Error(e)),
            },
            StreamValue::Error(e) => self.output.emit(StreamValue::Error(e.clone())),
            StreamValue::Completed => self.output.emit(StreamValue::Completed),
        }
    }
}

/// A node that republishes only the parent `Result`s its predicate accepts.
///
/// A predicate failure is contained: the `Err` is emitted downstream as a
/// [`StreamValue::Error`] in place of the value, never re-raised. `Error` and
/// `Completed` from the parent are forwarded unchanged, unconditionally.
pub struct FilterStream<T> {
    inner: Rc<FilterInner<T>>,
}

impl<T: Clone + 'static> FilterStream<T> {
    /// Creates a new filter over `parent`.
    pub fn new(parent: SharedStream<T>, predicate: impl Fn(&T) -> Result<bool> + 'static) -> Self {
        Self {
            inner: Rc::new(FilterInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                parent,
                predicate: Box::new(predicate),
                key: next_node_key("filter"),
            }),
        }
    }
}

impl<T: Clone + 'static> Stream for FilterStream<T> {
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
        let weak = Rc::downgrade(&self.inner);
        self.inner
            .parent
            .output()
            .add_action(self.inner.key.clone(), move |value| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_parent_value(value);
                }
            });
        self.inner.parent.start();
    }
}

impl<T> Clone for FilterStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Extension trait providing the `filter` combinator.
pub trait FilterExt: Stream + Sized + 'static {
    /// Suppresses parent `Result`s for which `predicate` returns `Ok(false)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rill_core::Stream;
    /// use rill_stream::{BindExt, FilterExt, SourceStream};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let kept = Rc::new(RefCell::new(Vec::new()));
    /// let stream = SourceStream::from_values(["wow!", "hello", "cool!"])
    ///     .filter(|s: &&str| Ok(s.ends_with('!')))
    ///     .bind_result({
    ///         let kept = kept.clone();
    ///         move |v| kept.borrow_mut().push(*v)
    ///     });
    /// stream.start();
    /// assert_eq!(*kept.borrow(), vec!["wow!", "cool!"]);
    /// ```
    fn filter<F>(self, predicate: F) -> FilterStream<Self::Output>
    where
        Self::Output: Clone + 'static,
        F: Fn(&Self::Output) -> Result<bool> + 'static,
    {
        FilterStream::new(rill_core::IntoShared::into_shared(self), predicate)
    }
}

impl<S: Stream + Sized + 'static> FilterExt for S {}
