// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A source wrapper that records release calls, for testing cleanup paths.

use conflux_core::{ConfluxError, Result, Settlement, Source};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::time::Duration;
use tokio::time::Sleep;

/// Shared counter of completed releases, kept by the test after the probe
/// itself has been handed to a merge.
#[derive(Clone, Debug, Default)]
pub struct ReleaseRecorder(Arc<AtomicUsize>);

impl ReleaseRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of release operations that ran to completion.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wraps a [`Source`], counting release completions and optionally making
/// the release suspend or fail.
///
/// The count increments once per completed release, so an at-most-once
/// release contract shows up as a count of exactly 1.
#[pin_project]
pub struct ReleaseProbe<S> {
    #[pin]
    inner: S,
    recorder: ReleaseRecorder,
    fail: bool,
    delay: Option<Duration>,
    sleeping: Option<Pin<Box<Sleep>>>,
}

impl<S> ReleaseProbe<S> {
    /// Wraps `inner`, returning the probe and the recorder observing it.
    pub fn wrap(inner: S) -> (Self, ReleaseRecorder) {
        let recorder = ReleaseRecorder::new();
        let probe = Self {
            inner,
            recorder: recorder.clone(),
            fail: false,
            delay: None,
            sleeping: None,
        };
        (probe, recorder)
    }

    /// Makes the release complete with an error (after any configured delay).
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Makes the release suspend for `duration` before completing.
    #[must_use]
    pub fn delayed(mut self, duration: Duration) -> Self {
        self.delay = Some(duration);
        self
    }
}

impl<S: Source> Source for ReleaseProbe<S> {
    type Item = S::Item;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        self.project().inner.poll_produce(cx)
    }

    fn poll_release(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        let this = self.project();
        if let Some(duration) = this.delay.take() {
            *this.sleeping = Some(Box::pin(tokio::time::sleep(duration)));
        }
        if let Some(sleep) = this.sleeping.as_mut() {
            ready!(sleep.as_mut().poll(cx));
            *this.sleeping = None;
        }
        this.recorder.0.fetch_add(1, Ordering::SeqCst);
        if *this.fail {
            Poll::Ready(Err(ConfluxError::release_error("injected release failure")))
        } else {
            Poll::Ready(Ok(()))
        }
    }
}
