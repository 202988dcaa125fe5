// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{next_node_key, SharedStream, Stream, StreamBinding, StreamValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Resolver<T> = dyn FnOnce() -> SharedStream<T>;

struct RecInner<T> {
    started: Cell<bool>,
    output: StreamBinding<T>,
    resolver: RefCell<Option<Box<Resolver<T>>>>,
    parent: RefCell<Option<SharedStream<T>>>,
    key: String,
}

/// A lazily bound node that resolves its parent at `start` time.
///
/// The constructor takes a closure *returning* the parent stream instead of
/// the parent itself. The closure is invoked exactly once, on the first
/// `start` call, at which point the resolved parent is subscribed to and
/// started. This breaks construction-order cycles: a pipeline can reference a
/// source that is only assigned after the pipeline has been built.
///
/// All parent emissions are forwarded unchanged.
///
/// # Examples
///
/// ```
/// use rill_core::{IntoShared, Stream};
/// use rill_stream::{BindExt, RecStream, SourceStream};
/// use std::cell::{Cell, RefCell};
/// use std::rc::Rc;
///
/// let slot: Rc<RefCell<Option<SourceStream<i32>>>> = Rc::new(RefCell::new(None));
/// let total = Rc::new(Cell::new(0));
///
/// let stream = RecStream::new({
///     let slot = slot.clone();
///     move || slot.borrow().clone().expect("source assigned").into_shared()
/// })
/// .bind_result({
///     let total = total.clone();
///     move |v| total.set(total.get() + v)
/// });
///
/// // The source only exists after the pipeline has been constructed.
/// *slot.borrow_mut() = Some(SourceStream::from_values([1, 2, 3]));
/// stream.start();
/// assert_eq!(total.get(), 6);
/// ```
pub struct RecStream<T> {
    inner: Rc<RecInner<T>>,
}

impl<T: Clone + 'static> RecStream<T> {
    /// Creates a new lazily bound node; `resolve` is deferred until `start`.
    pub fn new(resolve: impl FnOnce() -> SharedStream<T> + 'static) -> Self {
        Self {
            inner: Rc::new(RecInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                resolver: RefCell::new(Some(Box::new(resolve))),
                parent: RefCell::new(None),
                key: next_node_key("rec"),
            }),
        }
    }
}

impl<T: Clone + 'static> Stream for RecStream<T> {
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
        let Some(resolve) = self.inner.resolver.borrow_mut().take() else {
            return;
        };
        let parent = resolve();
        let weak = Rc::downgrade(&self.inner);
        parent
            .output()
            .add_action(self.inner.key.clone(), move |value: &StreamValue<T>| {
                if let Some(inner) = weak.upgrade() {
                    inner.output.emit(value.clone());
                }
            });
        parent.start();
        *self.inner.parent.borrow_mut() = Some(parent);
    }
}

impl<T> Clone for RecStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
