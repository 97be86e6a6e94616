// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
pub mod adapters;
pub mod emission;
pub mod error;
pub mod source;

pub use self::adapters::{from_emissions, from_stream, FromEmissions, FromStream};
pub use self::emission::Emission;
pub use self::error::{ConfluxError, Result};
pub use self::source::{Settlement, Source, SourceExt, WithRelease};
