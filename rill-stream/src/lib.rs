// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Combinators for synchronous push-based reactive streams.
//!
//! This crate provides the node types that make up a stream graph: the
//! [`SourceStream`] origin, the transforming combinators (filter, distinct,
//! sliding-window take, combine-latest merge, running-fold aggregate), the
//! lazily bound [`RecStream`], terminal binding sugar, and the
//! [`observe`](crate::observe) bridge from property-change notifications.
//!
//! # Architecture
//!
//! Building a pipeline only constructs the object graph; nothing is wired to
//! a parent until [`start`](rill_core::Stream::start) is called on the
//! terminal node, which subscribes each node to its parents (post-order) and
//! then activates the sources. Each operator lives in its own module and is
//! exposed through an extension trait, so pipelines compose by chaining:
//!
//! ```
//! use rill_core::Stream;
//! use rill_stream::{BindExt, FilterExt, SourceStream};
//!
//! let stream = SourceStream::from_values([1, 2, 3, 4])
//!     .filter(|v: &i32| Ok(v % 2 == 0))
//!     .bind_result(|v| println!("even: {v}"));
//! stream.start();
//! ```

pub mod aggregate;
pub mod bind;
pub mod distinct;
pub mod filter;
mod logging;
pub mod merge;
pub mod observe;
pub mod rec;
pub mod source;
pub mod take;

pub use self::aggregate::{AggregateExt, AggregateStream};
pub use self::bind::BindExt;
pub use self::distinct::{DistinctExt, DistinctStream};
pub use self::filter::{FilterExt, FilterStream};
pub use self::merge::{MergeStream, MergeWithExt};
pub use self::observe::{Observable, ObserveExt, PathError, Property, PropertyStream};
pub use self::rec::RecStream;
pub use self::source::SourceStream;
pub use self::take::{TakeExt, TakeStream};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::AggregateExt;
    pub use crate::bind::BindExt;
    pub use crate::distinct::DistinctExt;
    pub use crate::filter::FilterExt;
    pub use crate::merge::MergeWithExt;
    pub use crate::observe::ObserveExt;
    pub use crate::take::TakeExt;
    pub use crate::{MergeStream, PropertyStream, RecStream, SourceStream};
    pub use rill_core::{IntoShared, SharedStream, Stream, StreamBinding, StreamValue};
}
