// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{ConfluxError, Emission};
use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::sleep;

/// Drives a merged stream to completion, collecting values. Returns the first
/// in-band error instead, if the stream ends with one.
pub async fn collect_values<S, T>(stream: S) -> Result<Vec<T>, ConfluxError>
where
    S: Stream<Item = Emission<T>>,
{
    futures::pin_mut!(stream);
    let mut values = Vec::new();
    while let Some(emission) = stream.next().await {
        match emission {
            Emission::Value(value) => values.push(value),
            Emission::Error(e) => return Err(e),
        }
    }
    Ok(values)
}

/// Drives a merged stream to completion, keeping every emission as-is.
pub async fn collect_emissions<S, T>(stream: S) -> Vec<Emission<T>>
where
    S: Stream<Item = Emission<T>>,
{
    futures::pin_mut!(stream);
    let mut emissions = Vec::new();
    while let Some(emission) = stream.next().await {
        emissions.push(emission);
    }
    emissions
}

/// Asserts that `stream` emits nothing within `timeout_ms`.
pub async fn assert_no_emission<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _emission = stream.next() => {
            panic!("Unexpected emission, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}
