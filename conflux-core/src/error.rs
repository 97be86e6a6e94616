// Copyright 2026 The Conflux Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Conflux stream merging.
//!
//! This module defines the root [`ConfluxError`] type with variants for the
//! failure classes a merge can encounter, plus a [`Result`] alias used
//! throughout the workspace.

/// Root error type for all Conflux operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluxError {
    /// A source's "produce next" operation failed.
    ///
    /// This aborts the merge: remaining sources are released and the error is
    /// surfaced to the consumer.
    #[error("Source error: {context}")]
    SourceError {
        /// Description of what went wrong while producing the next value
        context: String,
    },

    /// A source's release operation failed during teardown.
    ///
    /// Release failures are best-effort: they are logged and never prevent
    /// the remaining sources from being released.
    #[error("Release error: {context}")]
    ReleaseError {
        /// Description of what went wrong while releasing the source
        context: String,
    },

    /// Custom error from user code.
    ///
    /// This wraps errors produced by user-provided sources, allowing them to
    /// be propagated through the merge unchanged.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ConfluxError {
    /// Create a source error with the given context.
    pub fn source_error(context: impl Into<String>) -> Self {
        Self::SourceError {
            context: context.into(),
        }
    }

    /// Create a release error with the given context.
    pub fn release_error(context: impl Into<String>) -> Self {
        Self::ReleaseError {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error came from a source's produce operation.
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceError { .. })
    }

    /// Check if this error came from a release operation.
    #[must_use]
    pub const fn is_release_error(&self) -> bool {
        matches!(self, Self::ReleaseError { .. })
    }
}

/// Specialized Result type for Conflux operations.
pub type Result<T> = std::result::Result<T, ConfluxError>;

impl Clone for ConfluxError {
    fn clone(&self) -> Self {
        match self {
            Self::SourceError { context } => Self::SourceError {
                context: context.clone(),
            },
            Self::ReleaseError { context } => Self::ReleaseError {
                context: context.clone(),
            },
            // The boxed error cannot be cloned; degrade to its message.
            Self::UserError(e) => Self::SourceError {
                context: format!("User error: {}", e),
            },
        }
    }
}
