// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Conflux workspace.
//!
//! This crate provides purpose-built sources and async assertion helpers for
//! testing the readiness-order merge. It is designed for use in development
//! and testing only, not for production code.
//!
//! # Key types
//!
//! ## `ScriptedSource<T>`
//!
//! A source that replays a fixed script, making the synchronous/suspending
//! distinction explicit:
//!
//! ```rust
//! use conflux_test_utils::{ScriptedSource, Step};
//! use std::time::Duration;
//!
//! // Value immediately, then a value 100ms later
//! let source = ScriptedSource::new([
//!     Step::Value(1),
//!     Step::Delay(Duration::from_millis(100)),
//!     Step::Value(2),
//! ]);
//! # let _ = source;
//! ```
//!
//! ## `ReleaseProbe<S>`
//!
//! Wraps any source and counts release completions, so at-most-once cleanup
//! shows up as a count of exactly 1.
//!
//! ## `SourceChannel<T>`
//!
//! An unbounded channel whose receiving half is a source, for imperative
//! push-then-expect test setups.

pub mod channel;
pub mod helpers;
pub mod release_probe;
pub mod scripted;

pub use self::channel::SourceChannel;
pub use self::helpers::{assert_no_emission, collect_emissions, collect_values};
pub use self::release_probe::{ReleaseProbe, ReleaseRecorder};
pub use self::scripted::{ScriptedSource, Step};
