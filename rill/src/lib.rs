// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rill
//!
//! A synchronous, push-based reactive stream engine: a small set of
//! composable dataflow nodes that propagate typed values, errors, and
//! completion signals through a graph of combinators — all on the caller's
//! stack, with no scheduler, no backpressure, and no threads.
//!
//! ## Overview
//!
//! Values travel as tri-state [`StreamValue`]s (`Result` / `Error` /
//! `Completed`). Building a pipeline only constructs the object graph;
//! calling [`Stream::start`] on the terminal node wires each node to its
//! parents and then activates the sources, so nothing is ever missed.
//! Failures inside user-supplied functions are contained as first-class
//! `Error` values rather than unwinding through the graph.
//!
//! ## Quick Start
//!
//! ```
//! use rill::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let shouts = Rc::new(RefCell::new(Vec::new()));
//!
//! let stream = SourceStream::from_values(["wow!", "hello", "cool!", "great", "awesome!"])
//!     .filter(|s: &&str| Ok(s.ends_with('!')))
//!     .bind_result({
//!         let shouts = shouts.clone();
//!         move |s| shouts.borrow_mut().push(*s)
//!     });
//! stream.start();
//!
//! assert_eq!(*shouts.borrow(), vec!["wow!", "cool!", "awesome!"]);
//! ```

// Re-export core types
pub use rill_core::{
    next_node_key, IntoShared, Result, SharedStream, Stream, StreamBinding, StreamError,
    StreamValue,
};

// Re-export node types and operator extension traits
pub use rill_stream::{
    AggregateExt, AggregateStream, BindExt, DistinctExt, DistinctStream, FilterExt, FilterStream,
    MergeStream, MergeWithExt, Observable, ObserveExt, PathError, Property, PropertyStream,
    RecStream, SourceStream, TakeExt, TakeStream,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rill_core::{IntoShared, Result, SharedStream, Stream, StreamBinding, StreamValue};
    pub use rill_stream::prelude::*;
}
