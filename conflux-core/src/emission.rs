// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ConfluxError;

/// An item of a merged output stream: either a value or an error.
///
/// Errors travel in-band through the stream, following Rx-style error
/// semantics where an error terminates the sequence. A merged stream yields
/// at most one `Error` item, as its last item before ending.
#[derive(Debug, Clone)]
pub enum Emission<T> {
    /// A successful value
    Value(T),
    /// An error that terminates the stream
    Error(ConfluxError),
}

impl<T: PartialEq> PartialEq for Emission<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Emission::Value(a), Emission::Value(b)) => a == b,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> Emission<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, Emission::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Emission::Error(_))
    }

    /// Converts from `Emission<T>` to `Option<T>`, discarding errors.
    pub fn ok(self) -> Option<T> {
        match self {
            Emission::Value(v) => Some(v),
            Emission::Error(_) => None,
        }
    }

    /// Converts from `Emission<T>` to `Option<ConfluxError>`, discarding values.
    pub fn err(self) -> Option<ConfluxError> {
        match self {
            Emission::Value(_) => None,
            Emission::Error(e) => Some(e),
        }
    }

    /// Maps an `Emission<T>` to `Emission<U>` by applying a function to the
    /// contained value. Errors are propagated unchanged.
    pub fn map<U, F>(self, f: F) -> Emission<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Emission::Value(v) => Emission::Value(f(v)),
            Emission::Error(e) => Emission::Error(e),
        }
    }

    /// Returns the contained value, panicking if it's an error.
    ///
    /// # Panics
    ///
    /// Panics if the emission is an `Error`.
    pub fn unwrap(self) -> T {
        match self {
            Emission::Value(v) => v,
            Emission::Error(e) => {
                panic!("called `Emission::unwrap()` on an `Error` value: {:?}", e)
            }
        }
    }

    /// Returns the contained value, panicking with a custom message if it's
    /// an error.
    ///
    /// # Panics
    ///
    /// Panics with the provided message if the emission is an `Error`.
    pub fn expect(self, msg: &str) -> T {
        match self {
            Emission::Value(v) => v,
            Emission::Error(e) => panic!("{}: {:?}", msg, e),
        }
    }
}

impl<T> From<Result<T, ConfluxError>> for Emission<T> {
    fn from(result: Result<T, ConfluxError>) -> Self {
        match result {
            Ok(v) => Emission::Value(v),
            Err(e) => Emission::Error(e),
        }
    }
}

impl<T> From<Emission<T>> for Result<T, ConfluxError> {
    fn from(emission: Emission<T>) -> Self {
        match emission {
            Emission::Value(v) => Ok(v),
            Emission::Error(e) => Err(e),
        }
    }
}
