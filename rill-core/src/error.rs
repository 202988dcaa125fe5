// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rill reactive stream engine.
//!
//! A [`StreamError`] has two lives. Returned from a user-supplied transform or
//! predicate, it is *contained*: the combinator that invoked the function
//! converts it into a [`StreamValue::Error`](crate::StreamValue::Error) on its
//! own output and never re-raises it. From then on it travels through the
//! graph as an ordinary payload, following the same fan-out rules as any
//! other emission.
//!
//! # Examples
//!
//! ```
//! use rill_core::{Result, StreamError};
//!
//! fn parse(input: &str) -> Result<i32> {
//!     input
//!         .parse()
//!         .map_err(|_| StreamError::stream_error(format!("not a number: {input}")))
//! }
//!
//! assert!(parse("17").is_ok());
//! assert!(parse("seventeen").is_err());
//! ```

use std::sync::Arc;

/// Root error type for values flowing through a stream graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    /// A stream function failed while processing a value.
    ///
    /// This is the general-purpose variant for failures raised inside
    /// user-supplied predicates and transforms.
    #[error("stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code.
    ///
    /// Wraps an arbitrary error produced by a user-provided function so it
    /// can be propagated through the stream graph. The error is reference
    /// counted because a single emission may fan out to many subscribers.
    #[error("user error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Create a stream processing error with the given context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }
}

/// Specialized `Result` type for stream functions.
///
/// Every user-supplied predicate or transform handed to a combinator returns
/// this type; an `Err` is emitted downstream as a
/// [`StreamValue::Error`](crate::StreamValue::Error) rather than propagated up
/// the call stack.
pub type Result<T> = std::result::Result<T, StreamError>;
