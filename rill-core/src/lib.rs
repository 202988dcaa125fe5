// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types for synchronous push-based reactive streams.
//!
//! This crate defines the event algebra ([`StreamValue`]), the multicast
//! dispatch primitive ([`StreamBinding`]), the node contract ([`Stream`]),
//! and the error type ([`StreamError`]) shared by every combinator in the
//! `rill` workspace. The engine is single-threaded and fully synchronous:
//! an emission runs every subscriber callback, and any work those callbacks
//! transitively trigger, before returning.

pub mod error;
pub mod stream;
pub mod stream_binding;
pub mod stream_value;

pub use self::error::{Result, StreamError};
pub use self::stream::{next_node_key, IntoShared, SharedStream, Stream};
pub use self::stream_binding::StreamBinding;
pub use self::stream_value::StreamValue;
