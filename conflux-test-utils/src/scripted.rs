// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A step-programmable source for deterministic readiness scenarios.

use conflux_core::{ConfluxError, Settlement, Source};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;
use tokio::time::Sleep;

/// One step of a [`ScriptedSource`] script.
#[derive(Debug)]
pub enum Step<T> {
    /// Produce this value on the current poll (a synchronous answer).
    Value(T),
    /// Return `Pending` once and wake immediately, so the next step arrives
    /// asynchronously (the equivalent of one scheduler tick).
    Suspend,
    /// Sleep for the given duration before the next step.
    Delay(Duration),
    /// Fail the current produce request.
    Fail(String),
}

/// A [`Source`] that replays a fixed script of steps, then reports
/// exhaustion.
///
/// Scripts make the difference between synchronous and suspending producers
/// explicit: a bare [`Step::Value`] settles on the first poll of its request,
/// while a value preceded by [`Step::Suspend`] or [`Step::Delay`] settles
/// only after the request has been pending.
pub struct ScriptedSource<T> {
    steps: VecDeque<Step<T>>,
    sleeping: Option<Pin<Box<Sleep>>>,
}

impl<T> ScriptedSource<T> {
    pub fn new(steps: impl IntoIterator<Item = Step<T>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            sleeping: None,
        }
    }

    /// A synchronous producer: every value is immediately available.
    pub fn sync_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(values.into_iter().map(Step::Value))
    }

    /// A suspending producer: every value arrives after one scheduler tick,
    /// like an async generator that yields between awaits.
    pub fn async_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            values
                .into_iter()
                .flat_map(|value| [Step::Suspend, Step::Value(value)]),
        )
    }
}

impl<T: Unpin> Source for ScriptedSource<T> {
    type Item = T;

    fn poll_produce(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Settlement<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(sleep) = this.sleeping.as_mut() {
                ready!(sleep.as_mut().poll(cx));
                this.sleeping = None;
            }
            match this.steps.pop_front() {
                Some(Step::Value(value)) => return Poll::Ready(Settlement::Value(value)),
                Some(Step::Suspend) => {
                    cx.waker().wake_by_ref();
                    return Poll::Pending;
                }
                Some(Step::Delay(duration)) => {
                    this.sleeping = Some(Box::pin(tokio::time::sleep(duration)));
                }
                Some(Step::Fail(message)) => {
                    return Poll::Ready(Settlement::Failed(ConfluxError::source_error(message)))
                }
                None => return Poll::Ready(Settlement::Done),
            }
        }
    }
}
