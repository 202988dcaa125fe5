// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, Result, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type ProduceFn<T1, T2> = dyn Fn(&[T1]) -> Result<T2>;

struct TakeInner<T1, T2> {
    started: Cell<bool>,
    output: StreamBinding<T2>,
    parent: SharedStream<T1>,
    produce: Box<ProduceFn<T1, T2>>,
    window: usize,
    buffer: RefCell<VecDeque<T1>>,
    key: String,
}

impl<T1: Clone + 'static, T2: 'static> TakeInner<T1, T2> {
    fn on_parent_value(&self, value: &StreamValue<T1>) {
        match value {
            StreamValue::Result(v) => {
                let window = {
                    let mut buffer = self.buffer.borrow_mut();
                    buffer.push_front(v.clone());
                    if buffer.len() > self.window {
                        buffer.pop_back();
                    }
                    if buffer.len() < self.window {
                        return;
                    }
                    // Most-recent-first snapshot, taken so the user function
                    // runs with no outstanding borrow.
                    buffer.iter().cloned().collect::<Vec<_>>()
                };
                match (self.produce)(&window) {
                    Ok(out) => self.output.emit(StreamValue::Result(out)),
                    Err(e) => self.output.emit(StreamValue::Error(e)),
                }
            }
            StreamValue::Error(e) => self.output.emit(StreamValue::Error(e.clone())),
            StreamValue::Completed => self.output.emit(StreamValue::Completed),
        }
    }
}

/// A sliding-window node over the `N` most recent parent `Result`s.
///
/// Each incoming value is pushed into a most-recent-`N` buffer, evicting the
/// oldest entry once the window is full. While fewer than `N` values have
/// been buffered nothing is emitted (cold-start suppression); from the `N`-th
/// value on, every arrival produces exactly one output computed by the
/// produce function over the buffer contents, ordered most-recent-first.
///
/// `Error` and `Completed` from the parent are forwarded (as `Error<T2>` and
/// an empty `Completed`) without touching the buffer. A produce failure is
/// contained and emitted as [`StreamValue::Error`].
pub struct TakeStream<T1, T2> {
    inner: Rc<TakeInner<T1, T2>>,
}

impl<T1: Clone + 'static, T2: 'static> TakeStream<T1, T2> {
    /// Creates a new sliding-window node over `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn new(
        parent: SharedStream<T1>,
        window: usize,
        produce: impl Fn(&[T1]) -> Result<T2> + 'static,
    ) -> Self {
        assert!(window >= 1, "TakeStream window length must be at least 1");
        Self {
            inner: Rc::new(TakeInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                parent,
                produce: Box::new(produce),
                window,
                buffer: RefCell::new(VecDeque::new()),
                key: next_node_key("take"),
            }),
        }
    }
}

impl<T1: Clone + 'static, T2: 'static> Stream for TakeStream<T1, T2> {
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

impl<T1, T2> Clone for TakeStream<T1, T2> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Extension trait providing the sliding-window `take` combinators.
pub trait TakeExt: Stream + Sized + 'static {
    /// Windows the `window` most recent parent values through `produce`.
    ///
    /// The slice handed to `produce` is ordered most-recent-first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rill_core::Stream;
    /// use rill_stream::{BindExt, SourceStream, TakeExt};
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let sum = Rc::new(Cell::new(0));
    /// let stream = SourceStream::counter(1, 4)
    ///     .take(3, |w: &[i32]| Ok(w[0] + w[1] + w[2]))
    ///     .bind_result({
    ///         let sum = sum.clone();
    ///         move |v| sum.set(sum.get() + v)
    ///     });
    /// stream.start();
    /// // (1+2+3) + (2+3+4)
    /// assert_eq!(sum.get(), 15);
    /// ```
    fn take<T2, F>(self, window: usize, produce: F) -> TakeStream<Self::Output, T2>
    where
        Self::Output: Clone + 'static,
        T2: 'static,
        F: Fn(&[Self::Output]) -> Result<T2> + 'static,
    {
        TakeStream::new(rill_core::IntoShared::into_shared(self), window, produce)
    }

    /// Windows consecutive pairs through `produce(previous, current)`.
    fn take_pairs<T2, F>(self, produce: F) -> TakeStream<Self::Output, T2>
    where
        Self::Output: Clone + 'static,
        T2: 'static,
        F: Fn(&Self::Output, &Self::Output) -> Result<T2> + 'static,
    {
        self.take(2, move |window| produce(&window[1], &window[0]))
    }
}

impl<S: Stream + Sized + 'static> TakeExt for S {}
