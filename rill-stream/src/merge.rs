// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, Result, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type TransformFn<T1, T2> = dyn Fn(&[T1]) -> Result<T2>;

struct MergeInner<T1, T2> {
    started: Cell<bool>,
    output: StreamBinding<T2>,
    parents: Vec<SharedStream<T1>>,
    transform: Box<TransformFn<T1, T2>>,
    cache: RefCell<Vec<T1>>,
    key: String,
}

impl<T1: Clone + Default + 'static, T2: 'static> MergeInner<T1, T2> {
    fn on_parent_value(&self, index: usize, value: &StreamValue<T1>) {
        match value {
            StreamValue::Result(v) => {
                let snapshot = {
                    let mut cache = self.cache.borrow_mut();
                    cache[index] = v.clone();
                    cache.clone()
                };
                match (self.transform)(&snapshot) {
                    Ok(out) => self.output.emit(StreamValue::Result(out)),
                    Err(e) => self.output.emit(StreamValue::Error(e)),
                }
            }
            StreamValue::Completed => {
                self.output.emit(StreamValue::Completed);
                self.cache.borrow_mut()[index] = T1::default();
            }
            StreamValue::Error(e) => {
                self.output.emit(StreamValue::Error(e.clone()));
                self.cache.borrow_mut()[index] = T1::default();
            }
        }
    }
}

/// An N-ary combine-latest node.
///
/// The node caches the most recent `Result` from each parent (slots start at
/// `T1::default()` when the node is started). Any single parent's `Result`
/// triggers one downstream `Result` computed by the transform over the
/// *entire* cache, with defaults standing in for parents that have not
/// emitted yet. A transform failure is contained and emitted as
/// [`StreamValue::Error`].
///
/// A `Completed` or `Error` from *any one* parent immediately surfaces as a
/// `Completed`/`Error` of the whole merge (and resets that parent's cache
/// slot to the default); completion does not wait for the remaining parents.
/// Downstream consumers that need all-parents-complete semantics must track
/// completion themselves.
pub struct MergeStream<T1, T2> {
    inner: Rc<MergeInner<T1, T2>>,
}

impl<T1: Clone + Default + 'static, T2: 'static> MergeStream<T1, T2> {
    /// Creates a new combine-latest node over `parents`.
    ///
    /// The arity is fixed at construction; the transform always receives one
    /// slot per parent, in the order the parents were given.
    pub fn new(
        transform: impl Fn(&[T1]) -> Result<T2> + 'static,
        parents: Vec<SharedStream<T1>>,
    ) -> Self {
        Self {
            inner: Rc::new(MergeInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                parents,
                transform: Box::new(transform),
                cache: RefCell::new(Vec::new()),
                key: next_node_key("merge"),
            }),
        }
    }
}

impl<T1: Clone + Default + 'static, T2: 'static> Stream for MergeStream<T1, T2> {
    type Output = T2;

    fn started(&self) -> bool {
        self.inner.started.get()
    }

    fn output(&self) -> &StreamBinding<T2> {
        &self.inner.output
    }

    fn start(&self) {
        if self.inner.started.replace(true) {
            return;
        }
        let arity = self.inner.parents.len();
        *self.inner.cache.borrow_mut() = vec![T1::default(); arity];
        // Wire every parent before starting any of them, so an early parent's
        // synchronous emissions see the full handler set.
        for (index, parent) in self.inner.parents.iter().enumerate() {
            let weak = Rc::downgrade(&self.inner);
            parent
                .output()
                .add_action(format!("{}-{index}", self.inner.key), move |value| {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_parent_value(index, value);
                    }
                });
        }
        for parent in &self.inner.parents {
            parent.start();
        }
    }
}

impl<T1, T2> Clone for MergeStream<T1, T2> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Extension trait providing the binary `merge_with` combinator.
pub trait MergeWithExt: Stream + Sized + 'static {
    /// Combine-latest of `self` and `other` through `transform(left, right)`.
    ///
    /// `self` is started first, so its fixed-sequence values are combined
    /// with `other`'s default before `other` emits.
    fn merge_with<S2, T2, F>(self, other: S2, transform: F) -> MergeStream<Self::Output, T2>
    where
        Self::Output: Clone + Default + 'static,
        S2: Stream<Output = Self::Output> + Sized + 'static,
        T2: 'static,
        F: Fn(&Self::Output, &Self::Output) -> Result<T2> + 'static,
    {
        MergeStream::new(
            move |values| transform(&values[0], &values[1]),
            vec![
                rill_core::IntoShared::into_shared(self),
                rill_core::IntoShared::into_shared(other),
            ],
        )
    }
}

impl<S: Stream + Sized + 'static> MergeWithExt for S {}
