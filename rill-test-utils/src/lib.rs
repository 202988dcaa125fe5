// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rill reactive stream workspace.
//!
//! This crate provides value collectors, event recorders, and observable
//! host-object fixtures for testing stream combinators. It is designed for
//! development and testing only, not for production code.
//!
//! The engine is synchronous: a test builds a pipeline, binds a
//! [`Collector`] or [`EventRecorder`], starts the terminal node, and asserts
//! on whatever was captured during the (fully synchronous) emission cascade.

pub mod collector;
pub mod helpers;
pub mod observable;

pub use self::collector::{Collector, EventRecorder, Recorded};
pub use self::helpers::fail_on_error;
pub use self::observable::{Address, Person, Profile};
