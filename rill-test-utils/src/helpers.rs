// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::Stream;
use rill_stream::BindExt;

/// Attaches a panic-on-error binding, so a test fails loudly if the stream
/// under test emits an unexpected `Error`.
pub fn fail_on_error<S>(stream: S) -> S
where
    S: Stream + Sized,
    S::Output: 'static,
{
    stream.bind_error(|e| panic!("unexpected stream error: {e}"))
}
