// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Keyed multicast dispatcher for stream emissions.
//!
//! A [`StreamBinding`] is the fan-out point of every stream node: it holds
//! named subscriber callbacks and broadcasts each emitted
//! [`StreamValue`](crate::StreamValue) to all of them, synchronously, on the
//! caller's stack.
//!
//! ## Characteristics
//!
//! - **Hot**: Late subscribers do not receive past emissions.
//! - **Keyed**: Every subscriber is registered under a unique `String` key and
//!   can be removed by that key; an auto-generated key is available when the
//!   caller never needs to unsubscribe.
//! - **Unordered**: Fan-out makes no guarantee about invocation order, only
//!   that every subscriber registered at the start of an emission is invoked
//!   exactly once for it.
//! - **Reentrant**: A subscriber may add or remove subscribers, or trigger a
//!   new emission on this or another binding, from inside its callback.
//!   Nothing guards against unbounded recursion in cyclic graphs.
//! - **Single-threaded**: Registration and emission from multiple threads is
//!   unsupported.
//!
//! ## Example
//!
//! ```
//! use rill_core::{StreamBinding, StreamValue};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let binding = StreamBinding::<i32>::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let key = binding.add_action_auto({
//!     let seen = seen.clone();
//!     move |value| {
//!         if let StreamValue::Result(v) = value {
//!             seen.set(seen.get() + v);
//!         }
//!     }
//! });
//!
//! binding.emit(StreamValue::Result(1));
//! binding.emit(StreamValue::Result(2));
//! assert_eq!(seen.get(), 3);
//!
//! binding.remove_action(&key);
//! binding.emit(StreamValue::Result(4));
//! assert_eq!(seen.get(), 3);
//! ```

use crate::StreamValue;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

type SubscriberFn<T> = dyn Fn(&StreamValue<T>);

struct BindingState<T> {
    actions: HashMap<String, Rc<SubscriberFn<T>>>,
    next_auto_key: u64,
}

/// A keyed multicast dispatcher owned by a stream node.
///
/// Stream nodes emit through their binding; consumers and downstream nodes
/// register callbacks on it. See the [module documentation](self) for the
/// dispatch contract.
pub struct StreamBinding<T> {
    state: RefCell<BindingState<T>>,
}

impl<T> StreamBinding<T> {
    /// Creates a new empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(BindingState {
                actions: HashMap::new(),
                next_auto_key: 0,
            }),
        }
    }

    /// Registers `action` under the given key.
    ///
    /// # Panics
    ///
    /// Panics if a subscriber with the same key is already registered; reusing
    /// a key is a programming error, not a runtime condition.
    pub fn add_action(&self, key: impl Into<String>, action: impl Fn(&StreamValue<T>) + 'static) {
        let key = key.into();
        let mut state = self.state.borrow_mut();
        match state.actions.entry(key) {
            Entry::Occupied(entry) => {
                panic!("duplicate subscriber key `{}` on StreamBinding", entry.key())
            }
            Entry::Vacant(entry) => {
                entry.insert(Rc::new(action));
            }
        }
    }

    /// Registers `action` under a generated key and returns that key.
    ///
    /// Keys come from a per-binding monotonic counter, so they never collide
    /// with each other; callers picking their own keys should avoid the
    /// `anon-` prefix.
    pub fn add_action_auto(&self, action: impl Fn(&StreamValue<T>) + 'static) -> String {
        let key = {
            let mut state = self.state.borrow_mut();
            let key = format!("anon-{}", state.next_auto_key);
            state.next_auto_key += 1;
            key
        };
        self.add_action(key.clone(), action);
        key
    }

    /// Removes the subscriber registered under `key`.
    ///
    /// Returns `true` if a subscriber was removed. Removing an unknown key is
    /// a no-op.
    pub fn remove_action(&self, key: &str) -> bool {
        self.state.borrow_mut().actions.remove(key).is_some()
    }

    /// Returns `true` if a subscriber is registered under `key`.
    #[must_use]
    pub fn contains_action(&self, key: &str) -> bool {
        self.state.borrow().actions.contains_key(key)
    }

    /// Returns the number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().actions.len()
    }

    /// Broadcasts `value` to every registered subscriber.
    ///
    /// The subscriber set is snapshotted when the emission begins: callbacks
    /// registered during the emission are not invoked for it, and callbacks
    /// removed during it still receive it. The call returns only after every
    /// subscriber (and any work it transitively triggered) has run.
    pub fn emit(&self, value: StreamValue<T>) {
        let actions: Vec<Rc<SubscriberFn<T>>> =
            self.state.borrow().actions.values().cloned().collect();
        for action in actions {
            action(&value);
        }
    }

    /// Broadcasts a produced value.
    ///
    /// Convenience wrapper around `emit(StreamValue::Result(value))`.
    pub fn emit_result(&self, value: T) {
        self.emit(StreamValue::Result(value));
    }
}

impl<T> Default for StreamBinding<T> {
    fn default() -> Self {
        Self::new()
    }
}
