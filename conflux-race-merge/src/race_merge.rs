// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{ConfluxError, Emission, Settlement, Source};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// How a settlement arrived, relative to the request that produced it.
///
/// An `Immediate` settlement came back on the first poll of its request (a
/// synchronous producer); a `Resumed` settlement was pending at least once
/// before arriving. Immediate settlements win the race over resumed ones from
/// the same wakeup, which is what makes synchronous sources interleave
/// strictly by slot order among themselves while suspending sources
/// interleave by completion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    Immediate,
    Resumed,
}

/// One merge input and its request bookkeeping.
///
/// Invariant: at most one outstanding request per slot. `held` is the
/// settled-but-unconsumed answer of the current request, and a new request is
/// issued only once `held` has been taken.
struct Slot<T> {
    source: Pin<Box<dyn Source<Item = T> + Send + Sync>>,
    held: Option<(Emission<T>, Arrival)>,
    suspended: bool,
    released: bool,
}

enum Phase {
    /// Racing produce requests and yielding winners.
    Running,
    /// Releasing every remaining slot; carries the failure to surface after
    /// cleanup, if the drain was triggered by one.
    Draining { failure: Option<ConfluxError> },
    /// All slots retired or released; only `None` from here on.
    Terminated,
}

/// Readiness-order merge over an ordered collection of sources.
///
/// Yields each upstream value as soon as it becomes available. Among
/// settlements available in the same round, synchronous answers win over
/// asynchronously-resolved ones, and the lowest slot position breaks the
/// remaining ties. Exhausted sources retire from the race; the merged stream
/// ends once every source has retired.
///
/// A produce failure aborts the merge: every slot still active (the failing
/// one included) is released, then the failure is yielded as the final
/// [`Emission::Error`] item.
///
/// Sources must be `Send + Sync` to ensure safe concurrent access.
pub struct RaceMerge<T> {
    active: Vec<Slot<T>>,
    phase: Phase,
}

impl<T> RaceMerge<T> {
    #[must_use]
    pub fn new<S>(sources: Vec<S>) -> Self
    where
        S: Source<Item = T> + Send + Sync + 'static,
    {
        let active = sources
            .into_iter()
            .map(|source| Slot {
                source: Box::pin(source) as Pin<Box<dyn Source<Item = T> + Send + Sync>>,
                held: None,
                suspended: false,
                released: false,
            })
            .collect();

        Self {
            active,
            phase: Phase::Running,
        }
    }

    /// Stops the merge before exhaustion, releasing every still-active source.
    ///
    /// This is the explicit early-stop operation: any settlements already held
    /// but not yet consumed are discarded, and the future completes only once
    /// every remaining source's release operation has finished. Sources
    /// without a release operation are skipped.
    pub async fn stop(mut self)
    where
        T: Unpin,
    {
        self.begin_drain();
        while self.next().await.is_some() {}
    }

    fn begin_drain(&mut self) {
        if matches!(self.phase, Phase::Running) {
            for slot in &mut self.active {
                slot.held = None;
            }
            self.phase = Phase::Draining { failure: None };
        }
    }

    /// Issues a request for every active slot lacking one and records the
    /// settlements that arrive. Exhausted slots retire in place, preserving
    /// the relative order of the rest.
    fn fill_requests(&mut self, cx: &mut Context<'_>) {
        let mut idx = 0;
        while idx < self.active.len() {
            let slot = &mut self.active[idx];
            if slot.held.is_some() {
                idx += 1;
                continue;
            }
            match slot.source.as_mut().poll_produce(cx) {
                Poll::Ready(settlement) => {
                    let arrival = if slot.suspended {
                        Arrival::Resumed
                    } else {
                        Arrival::Immediate
                    };
                    slot.suspended = false;
                    match settlement {
                        Settlement::Value(value) => {
                            slot.held = Some((Emission::Value(value), arrival));
                            idx += 1;
                        }
                        Settlement::Failed(e) => {
                            // Failures race like values so the tie-break
                            // decides which failure surfaces.
                            slot.held = Some((Emission::Error(e), arrival));
                            idx += 1;
                        }
                        Settlement::Done => {
                            self.active.remove(idx);
                        }
                    }
                }
                Poll::Pending => {
                    slot.suspended = true;
                    idx += 1;
                }
            }
        }
    }

    /// Picks the winning slot among held settlements: the lowest-index
    /// immediate settlement if any, otherwise the lowest-index resumed one.
    fn winner(&self) -> Option<usize> {
        let mut resumed = None;
        for (idx, slot) in self.active.iter().enumerate() {
            match slot.held {
                Some((_, Arrival::Immediate)) => return Some(idx),
                Some((_, Arrival::Resumed)) => {
                    if resumed.is_none() {
                        resumed = Some(idx);
                    }
                }
                None => {}
            }
        }
        resumed
    }

    /// Drives the release of every slot not yet released. Release failures
    /// are logged and treated as completed; they never stop the remaining
    /// releases.
    fn poll_releases(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let mut all_released = true;
        for slot in &mut self.active {
            if slot.released {
                continue;
            }
            match slot.source.as_mut().poll_release(cx) {
                Poll::Ready(Ok(())) => slot.released = true,
                Poll::Ready(Err(e)) => {
                    slot.released = true;
                    crate::warn!("race_merge: source release failed: {}", e);
                }
                Poll::Pending => all_released = false,
            }
        }
        if all_released {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

impl<T> Stream for RaceMerge<T>
where
    T: Unpin,
{
    type Item = Emission<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = Pin::into_inner(self);

        loop {
            match this.phase {
                Phase::Terminated => return Poll::Ready(None),
                Phase::Running => {
                    this.fill_requests(cx);

                    if let Some(idx) = this.winner() {
                        let (emission, _arrival) = this.active[idx].held.take().unwrap();
                        match emission {
                            Emission::Value(value) => {
                                return Poll::Ready(Some(Emission::Value(value)));
                            }
                            Emission::Error(e) => {
                                crate::error!("race_merge: source failed, aborting merge: {}", e);
                                // The failing slot stays active so its
                                // release is attempted with the rest.
                                this.phase = Phase::Draining { failure: Some(e) };
                            }
                        }
                    } else if this.active.is_empty() {
                        this.phase = Phase::Terminated;
                        return Poll::Ready(None);
                    } else {
                        return Poll::Pending;
                    }
                }
                Phase::Draining { .. } => match this.poll_releases(cx) {
                    Poll::Ready(()) => {
                        this.active.clear();
                        let failure = match &mut this.phase {
                            Phase::Draining { failure } => failure.take(),
                            _ => None,
                        };
                        this.phase = Phase::Terminated;
                        return match failure {
                            Some(e) => Poll::Ready(Some(Emission::Error(e))),
                            None => Poll::Ready(None),
                        };
                    }
                    Poll::Pending => return Poll::Pending,
                },
            }
        }
    }
}

impl<T> Drop for RaceMerge<T> {
    fn drop(&mut self) {
        // Best-effort pass for consumers that drop the stream without
        // stop(): synchronous releases still run; suspending ones cannot
        // complete here and are reported.
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        for slot in &mut self.active {
            if slot.released {
                continue;
            }
            match slot.source.as_mut().poll_release(&mut cx) {
                Poll::Ready(Ok(())) => slot.released = true,
                Poll::Ready(Err(e)) => {
                    slot.released = true;
                    crate::warn!("race_merge: source release failed: {}", e);
                }
                Poll::Pending => {
                    crate::warn!(
                        "race_merge: dropped with a release still pending; use stop() to await cleanup"
                    );
                }
            }
        }
    }
}

/// Extension trait for merging a vector of sources in readiness order.
pub trait RaceMergeExt {
    type Item;

    /// Merges multiple sources, emitting each value as soon as it becomes
    /// available, with ties broken by slot position.
    fn race_merge(self) -> RaceMerge<Self::Item>;
}

impl<T, S> RaceMergeExt for Vec<S>
where
    S: Source<Item = T> + Send + Sync + 'static,
{
    type Item = T;

    fn race_merge(self) -> RaceMerge<T> {
        RaceMerge::new(self)
    }
}
