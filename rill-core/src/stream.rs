// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The stream node contract.
//!
//! Every node in a stream graph, whether a source or a combinator, exposes
//! the same capability set: a started flag, an owned output
//! [`StreamBinding`], and an idempotent [`start`](Stream::start) activation
//! method. Building a pipeline only constructs the object graph; nothing
//! subscribes to a parent until `start` is invoked on the terminal node,
//! which wires each node to its parents and then recursively starts them.

use crate::StreamBinding;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A stream node: a unit that pushes a sequence of
/// [`StreamValue`](crate::StreamValue)s to its output binding over time.
///
/// # Lifecycle
///
/// A node is constructed inert. The first call to [`start`](Self::start)
/// subscribes the node's handler to each parent's output binding (using a
/// node-local, node-lifetime key), then starts the parents, so parent
/// emissions produced during the parent's own `start` are never missed.
/// Subsequent calls are no-ops, and `start` never fails. Once started a node
/// stays live; there is no stop or reset.
pub trait Stream {
    /// The type of values this node emits.
    type Output;

    /// Whether this node has been started yet.
    fn started(&self) -> bool;

    /// The binding triggered every time this node emits a value.
    fn output(&self) -> &StreamBinding<Self::Output>;

    /// Activates this node and, recursively, its parents. Idempotent.
    ///
    /// Call after all bindings and transformations have been attached:
    /// subscribers registered later miss anything emitted during `start`
    /// itself.
    fn start(&self);
}

/// A shared, type-erased handle to a stream node.
///
/// Combinators hold their parents through this alias, which also allows a
/// single parent to feed several downstream nodes.
pub type SharedStream<T> = Rc<dyn Stream<Output = T>>;

impl<S: Stream + ?Sized> Stream for Rc<S> {
    type Output = S::Output;

    fn started(&self) -> bool {
        (**self).started()
    }

    fn output(&self) -> &StreamBinding<Self::Output> {
        (**self).output()
    }

    fn start(&self) {
        (**self).start();
    }
}

/// Conversion into a [`SharedStream`] handle.
pub trait IntoShared: Stream + Sized + 'static {
    /// Wraps this node into a shared, type-erased handle.
    fn into_shared(self) -> SharedStream<Self::Output> {
        Rc::new(self)
    }
}

impl<S: Stream + Sized + 'static> IntoShared for S {}

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh node-lifetime subscriber key with the given prefix.
///
/// Nodes use these keys when subscribing to their parents' bindings; the
/// global counter keeps them unique even when one parent feeds many children.
#[must_use]
pub fn next_node_key(prefix: &str) -> String {
    let id = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}
