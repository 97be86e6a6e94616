// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Channel-backed sources for imperative test setups: push values through the
//! sender, consume them from the merged stream.

use conflux_core::{from_stream, FromStream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// An unbounded channel whose receiving half is a merge [`conflux_core::Source`].
///
/// Dropping the sender exhausts the source.
pub struct SourceChannel<T> {
    pub sender: mpsc::UnboundedSender<T>,
    pub source: FromStream<UnboundedReceiverStream<T>>,
}

impl<T> SourceChannel<T> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            source: from_stream(UnboundedReceiverStream::new(receiver)),
        }
    }

    /// Two independent channels, for the common two-source arrangement.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        (Self::new(), Self::new())
    }
}

impl<T> Default for SourceChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}
