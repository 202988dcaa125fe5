// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, Result, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type IncludeFn<T> = dyn Fn(&T, &T) -> Result<bool>;

struct DistinctInner<T> {
    started: Cell<bool>,
    output: StreamBinding<T>,
    parent: SharedStream<T>,
    include: Box<IncludeFn<T>>,
    previous: RefCell<T>,
    key: String,
}

impl<T: Clone + 'static> DistinctInner<T> {
    fn on_parent_value(&self, value: &StreamValue<T>) {
        match value {
            StreamValue::Result(v) => {
                let decision = {
                    let previous = self.previous.borrow();
                    (self.include)(v, &previous)
                };
                match decision {
                    Ok(true) => {
                        self.output.emit(StreamValue::Result(v.clone()));
                        *self.previous.borrow_mut() = v.clone();
                    }
                    Ok(false) => {}
                    Err(e) => self.output.emit(StreamValue::Error(e)),
                }
            }
            StreamValue::Error(e) => self.output.emit(StreamValue::Error(e.clone())),
            StreamValue::Completed => self.output.emit(StreamValue::Completed),
        }
    }
}

/// A node that compares each incoming value against the last value it
/// *emitted* and republishes only those the inclusion predicate accepts.
///
/// The comparison baseline starts at `T::default()` when the node is started,
/// before any parent emission is possible. Suppressed inputs do not move the
/// baseline: it always holds the most recently emitted value, not the most
/// recently received one. An `Err` from the predicate is contained and
/// emitted downstream as [`StreamValue::Error`]; the baseline is left
/// untouched.
pub struct DistinctStream<T> {
    inner: Rc<DistinctInner<T>>,
}

impl<T: Clone + Default + 'static> DistinctStream<T> {
    /// Creates a new distinct node over `parent`.
    ///
    /// `include` receives `(incoming, previous)` and returns whether the
    /// incoming value should be emitted.
    pub fn new(
        parent: SharedStream<T>,
        include: impl Fn(&T, &T) -> Result<bool> + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(DistinctInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                parent,
                include: Box::new(include),
                previous: RefCell::new(T::default()),
                key: next_node_key("distinct"),
            }),
        }
    }
}

impl<T: Clone + Default + 'static> Stream for DistinctStream<T> {
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
        *self.inner.previous.borrow_mut() = T::default();
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

impl<T> Clone for DistinctStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Extension trait providing the `distinct` and `unique` combinators.
pub trait DistinctExt: Stream + Sized + 'static {
    /// Emits an incoming value only when `include(incoming, previous)` accepts
    /// it, where `previous` is the last value this node emitted.
    fn distinct<F>(self, include: F) -> DistinctStream<Self::Output>
    where
        Self::Output: Clone + Default + 'static,
        F: Fn(&Self::Output, &Self::Output) -> Result<bool> + 'static,
    {
        DistinctStream::new(rill_core::IntoShared::into_shared(self), include)
    }

    /// Emits only values that differ from the previously emitted value.
    ///
    /// Note the baseline starts at `T::default()`, so a first value equal to
    /// the default is suppressed.
    fn unique(self) -> DistinctStream<Self::Output>
    where
        Self::Output: Clone + Default + PartialEq + 'static,
    {
        self.distinct(|incoming, previous| Ok(incoming != previous))
    }
}

impl<S: Stream + Sized + 'static> DistinctExt for S {}
