// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adapters turning `futures::Stream`s into merge [`Source`]s.

use crate::emission::Emission;
use crate::source::{Settlement, Source};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use pin_project::pin_project;

/// A [`Source`] backed by a plain `futures::Stream`.
///
/// Stream exhaustion maps to [`Settlement::Done`]; the source has no release
/// operation beyond the stream's own `Drop`. Created by [`from_stream`].
#[pin_project]
pub struct FromStream<S> {
    #[pin]
    inner: S,
}

/// Turns any `futures::Stream` into a [`Source`] with no release operation.
///
/// # Examples
///
/// ```rust
/// use conflux_core::from_stream;
/// use futures::stream;
///
/// let source = from_stream(stream::iter(vec![1, 2, 3]));
/// # let _ = source;
/// ```
pub fn from_stream<S: Stream>(stream: S) -> FromStream<S> {
    FromStream { inner: stream }
}

impl<S: Stream> Source for FromStream<S> {
    type Item = S::Item;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        match self.project().inner.poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Settlement::Value(item)),
            Poll::Ready(None) => Poll::Ready(Settlement::Done),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// A [`Source`] backed by a stream of [`Emission`]s.
///
/// In-band `Emission::Error` items settle as [`Settlement::Failed`], aborting
/// a merge the source participates in. Created by [`from_emissions`].
#[pin_project]
pub struct FromEmissions<S> {
    #[pin]
    inner: S,
}

/// Turns a stream of [`Emission`]s into a [`Source`], mapping in-band errors
/// to failed settlements.
pub fn from_emissions<S, T>(stream: S) -> FromEmissions<S>
where
    S: Stream<Item = Emission<T>>,
{
    FromEmissions { inner: stream }
}

impl<S, T> Source for FromEmissions<S>
where
    S: Stream<Item = Emission<T>>,
{
    type Item = T;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        match self.project().inner.poll_next(cx) {
            Poll::Ready(Some(Emission::Value(item))) => Poll::Ready(Settlement::Value(item)),
            Poll::Ready(Some(Emission::Error(e))) => Poll::Ready(Settlement::Failed(e)),
            Poll::Ready(None) => Poll::Ready(Settlement::Done),
            Poll::Pending => Poll::Pending,
        }
    }
}
