// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The collaborator contract for merge inputs.
//!
//! A [`Source`] produces values one at a time through [`Source::poll_produce`]
//! and may expose a release operation through [`Source::poll_release`], invoked
//! by a merge when the source is abandoned before exhaustion. The default
//! release completes immediately, so sources without cleanup needs implement
//! only `poll_produce`.

use crate::error::{ConfluxError, Result};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// The outcome of one "produce next" request.
#[derive(Debug)]
pub enum Settlement<T> {
    /// The source produced a value.
    Value(T),
    /// The source is exhausted; it will not be polled again.
    Done,
    /// The produce operation failed. A merge aborts on this settlement.
    Failed(ConfluxError),
}

impl<T> Settlement<T> {
    /// Returns `true` if this settlement carries a value.
    pub const fn is_value(&self) -> bool {
        matches!(self, Settlement::Value(_))
    }

    /// Returns `true` if this settlement reports exhaustion.
    pub const fn is_done(&self) -> bool {
        matches!(self, Settlement::Done)
    }

    /// Returns `true` if this settlement reports a failure.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Settlement::Failed(_))
    }
}

/// A merge input: a sequence of values with an optional release operation.
///
/// `poll_produce` is the required "produce next" capability; supplying a
/// handle without it is a type error, so no runtime validation exists.
/// A caller must stop polling `poll_produce` once it has returned
/// [`Settlement::Done`] or [`Settlement::Failed`].
///
/// `poll_release` is called at most once per source (possibly across several
/// wakeups until it completes), and only when the source is abandoned before
/// exhaustion.
pub trait Source {
    /// The type of values this source produces.
    type Item;

    /// Poll for the next settlement.
    ///
    /// Returning `Poll::Pending` leaves the request outstanding; the source
    /// must arrange for the task to be woken when the settlement is ready.
    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>>;

    /// Poll the release operation.
    ///
    /// The default implementation completes immediately, for sources that hold
    /// no resources.
    fn poll_release(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        let _ = cx;
        Poll::Ready(Ok(()))
    }
}

impl<S: Source + ?Sized> Source for Pin<Box<S>> {
    type Item = S::Item;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        self.get_mut().as_mut().poll_produce(cx)
    }

    fn poll_release(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.get_mut().as_mut().poll_release(cx)
    }
}

/// Extension methods for [`Source`].
pub trait SourceExt: Source + Sized {
    /// Attaches an async release operation to this source.
    ///
    /// The closure is invoked (once) when a merge abandons the source before
    /// exhaustion; the returned future is driven to completion before the
    /// merge finishes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_core::{from_stream, SourceExt};
    /// use futures::stream;
    ///
    /// let source = from_stream(stream::iter(vec![1, 2, 3]))
    ///     .with_release(|| async { Ok(()) });
    /// # let _ = source;
    /// ```
    fn with_release<F, Fut>(self, release: F) -> WithRelease<Self, F, Fut>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        WithRelease {
            inner: self,
            release: Some(release),
            releasing: None,
        }
    }
}

impl<S: Source> SourceExt for S {}

/// A source with an attached release operation. Created by
/// [`SourceExt::with_release`].
#[pin_project::pin_project]
pub struct WithRelease<S, F, Fut> {
    #[pin]
    inner: S,
    release: Option<F>,
    #[pin]
    releasing: Option<Fut>,
}

impl<S, F, Fut> Source for WithRelease<S, F, Fut>
where
    S: Source,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    type Item = S::Item;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        self.project().inner.poll_produce(cx)
    }

    fn poll_release(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        let mut this = self.project();

        if this.releasing.is_none() {
            match this.release.take() {
                Some(factory) => this.releasing.as_mut().set(Some(factory())),
                // Release already ran to completion earlier.
                None => return Poll::Ready(Ok(())),
            }
        }

        match this.releasing.as_mut().as_pin_mut() {
            Some(fut) => {
                let result = core::task::ready!(fut.poll(cx));
                this.releasing.set(None);
                Poll::Ready(result)
            }
            None => Poll::Ready(Ok(())),
        }
    }
}
