// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, Result, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::ops::Add;
use std::rc::Rc;

type FoldFn<T1, T2> = dyn Fn(&T2, &T1) -> Result<T2>;

struct AggregateInner<T1, T2> {
    started: Cell<bool>,
    output: StreamBinding<T2>,
    parent: SharedStream<T1>,
    fold: Box<FoldFn<T1, T2>>,
    accumulator: RefCell<T2>,
    key: String,
}

impl<T1: 'static, T2: Clone + 'static> AggregateInner<T1, T2> {
    fn on_parent_value(&self, value: &StreamValue<T1>) {
        match value {
            StreamValue::Result(v) => {
                let folded = {
                    let accumulator = self.accumulator.borrow();
                    (self.fold)(&accumulator, v)
                };
                match folded {
                    Ok(next) => {
                        *self.accumulator.borrow_mut() = next.clone();
                        self.output.emit(StreamValue::Result(next));
                    }
                    // Accumulator is left untouched on failure.
                    Err(e) => self.output.emit(StreamValue::Error(e)),
                }
            }
            StreamValue::Error(e) => self.output.emit(StreamValue::Error(e.clone())),
            StreamValue::Completed => self.output.emit(StreamValue::Completed),
        }
    }
}

/// A running-fold node: each parent `Result` is folded into an accumulator
/// and the new accumulator value is emitted.
///
/// The last emitted value is therefore the fold of everything received so
/// far. A fold failure is contained and emitted as [`StreamValue::Error`].
/// `Error` and `Completed` from the parent forward unchanged.
pub struct AggregateStream<T1, T2> {
    inner: Rc<AggregateInner<T1, T2>>,
}

impl<T1: 'static, T2: Clone + 'static> AggregateStream<T1, T2> {
    /// Creates a new running fold over `parent`, starting from `seed`.
    pub fn new(
        parent: SharedStream<T1>,
        seed: T2,
        fold: impl Fn(&T2, &T1) -> Result<T2> + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(AggregateInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                parent,
                fold: Box::new(fold),
                accumulator: RefCell::new(seed),
                key: next_node_key("aggregate"),
            }),
        }
    }
}

impl<T1: 'static, T2: Clone + 'static> Stream for AggregateStream<T1, T2> {
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

impl<T1, T2> Clone for AggregateStream<T1, T2> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Extension trait providing the running-fold combinators.
pub trait AggregateExt: Stream + Sized + 'static {
    /// Folds every parent value into an accumulator seeded with `seed`,
    /// emitting each intermediate accumulator.
    fn aggregate<T2, F>(self, seed: T2, fold: F) -> AggregateStream<Self::Output, T2>
    where
        Self::Output: 'static,
        T2: Clone + 'static,
        F: Fn(&T2, &Self::Output) -> Result<T2> + 'static,
    {
        AggregateStream::new(rill_core::IntoShared::into_shared(self), seed, fold)
    }

    /// Emits the running sum of all received values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rill_core::Stream;
    /// use rill_stream::{AggregateExt, BindExt, SourceStream};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let last = Rc::new(Cell::new(0));
    /// let stream = SourceStream::repeat(2, 8).sum().bind_result({
    ///     let last = last.clone();
    ///     move |v| last.set(*v)
    /// });
    /// stream.start();
    /// assert_eq!(last.get(), 16);
    /// ```
    fn sum(self) -> AggregateStream<Self::Output, Self::Output>
    where
        Self::Output: Clone + Default + Add<Output = Self::Output> + 'static,
    {
        self.aggregate(Self::Output::default(), |accumulator, value| {
            Ok(accumulator.clone() + value.clone())
        })
    }

    /// Emits the running count of received values.
    fn count(self) -> AggregateStream<Self::Output, usize>
    where
        Self::Output: 'static,
    {
        self.aggregate(0, |count, _| Ok(count + 1))
    }
}

impl<S: Stream + Sized + 'static> AggregateExt for S {}
