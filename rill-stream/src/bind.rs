// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Stream, StreamError, StreamValue};

/// Terminal binding sugar for consuming a node's output.
///
/// Each method registers a variant-filtered subscriber on the node's output
/// binding under an auto-generated key and returns the node, so calls chain.
/// Neither method starts the node or otherwise alters its control flow; call
/// [`start`](Stream::start) after all bindings are attached.
pub trait BindExt: Stream + Sized {
    /// Invokes `callback` for every `Result` this node emits, ignoring
    /// `Error` and `Completed`.
    fn bind_result(self, callback: impl Fn(&Self::Output) + 'static) -> Self
    where
        Self::Output: 'static,
    {
        self.output().add_action_auto(move |value| {
            if let StreamValue::Result(v) = value {
                callback(v);
            }
        });
        self
    }

    /// Invokes `callback` for every `Error` this node emits, ignoring
    /// `Result` and `Completed`.
    ///
    /// A callback that panics does so on the emitting call stack; since
    /// emission is a direct call rather than a queued dispatch, this is the
    /// way to opt into fail-loudly error handling.
    fn bind_error(self, callback: impl Fn(&StreamError) + 'static) -> Self
    where
        Self::Output: 'static,
    {
        self.output().add_action_auto(move |value| {
            if let StreamValue::Error(e) = value {
                callback(e);
            }
        });
        self
    }
}

impl<S: Stream + Sized> BindExt for S {}
