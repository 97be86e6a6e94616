// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Readiness-order fan-in merge.
//!
//! [`RaceMerge`] races an ordered collection of [`conflux_core::Source`]s and
//! yields each value as soon as it becomes available. See the crate README
//! for the tie-break and cleanup contract.
//!
//! # Examples
//!
//! ```rust
//! use conflux_core::from_stream;
//! use conflux_race_merge::RaceMergeExt;
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let merged = vec![
//!     from_stream(futures::stream::iter(vec![1, 2])),
//!     from_stream(futures::stream::iter(vec![3, 4])),
//! ]
//! .race_merge();
//!
//! let values: Vec<i32> = merged.filter_map(|e| async { e.ok() }).collect().await;
//! assert_eq!(values, vec![1, 2, 3, 4]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]
pub mod logging;
mod race_merge;

pub use race_merge::{RaceMerge, RaceMergeExt};
