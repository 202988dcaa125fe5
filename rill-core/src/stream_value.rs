// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::StreamError;

/// The tri-state payload pushed between stream nodes.
///
/// Every emission carries exactly one of the three variants. Combinators
/// match exhaustively on this enum, so "forward control events unchanged" is
/// enforced by the type system rather than by convention: a `Result` may be
/// transformed or suppressed, while `Error` and `Completed` always pass
/// through untouched.
#[derive(Debug, Clone)]
pub enum StreamValue<T> {
    /// A produced value.
    Result(T),
    /// A failure signal carrying the causing error.
    Error(StreamError),
    /// A payload-less sentinel signaling the producing stream has no more
    /// values.
    Completed,
}

impl<T: PartialEq> PartialEq for StreamValue<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamValue::Result(a), StreamValue::Result(b)) => a == b,
            (StreamValue::Completed, StreamValue::Completed) => true,
            // Errors are never equal
            _ => false,
        }
    }
}

impl<T> StreamValue<T> {
    /// Returns `true` if this is a `Result`.
    pub const fn is_result(&self) -> bool {
        matches!(self, StreamValue::Result(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamValue::Error(_))
    }

    /// Returns `true` if this is the `Completed` sentinel.
    pub const fn is_completed(&self) -> bool {
        matches!(self, StreamValue::Completed)
    }

    /// Converts from `StreamValue<T>` to `Option<T>`, discarding errors and
    /// completion.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamValue::Result(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `StreamValue<T>` to `Option<StreamError>`, discarding
    /// values and completion.
    pub fn err(self) -> Option<StreamError> {
        match self {
            StreamValue::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a reference to the produced value, if any.
    pub fn as_result(&self) -> Option<&T> {
        match self {
            StreamValue::Result(v) => Some(v),
            _ => None,
        }
    }

    /// Maps a `StreamValue<T>` to `StreamValue<U>` by applying a function to
    /// the contained value.
    ///
    /// `Error` and `Completed` are propagated unchanged.
    pub fn map<U, F>(self, f: F) -> StreamValue<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StreamValue::Result(v) => StreamValue::Result(f(v)),
            StreamValue::Error(e) => StreamValue::Error(e),
            StreamValue::Completed => StreamValue::Completed,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the value is an `Error` or `Completed`.
    pub fn unwrap(self) -> T {
        match self {
            StreamValue::Result(v) => v,
            StreamValue::Error(e) => {
                panic!("called `StreamValue::unwrap()` on an `Error` value: {e:?}")
            }
            StreamValue::Completed => {
                panic!("called `StreamValue::unwrap()` on a `Completed` value")
            }
        }
    }

    /// Returns the contained value, panicking with a custom message otherwise.
    ///
    /// # Panics
    ///
    /// Panics with the provided message if the value is not a `Result`.
    pub fn expect(self, msg: &str) -> T {
        match self {
            StreamValue::Result(v) => v,
            other => panic!("{}: {:?}", msg, other.map(|_| ())),
        }
    }
}

impl<T> From<crate::Result<T>> for StreamValue<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(v) => StreamValue::Result(v),
            Err(e) => StreamValue::Error(e),
        }
    }
}
