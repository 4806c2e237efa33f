//! Error types for stream construction and production.

use thiserror::Error;

use randgen_core::error::{BuildError, OptionsError, SampleError};

/// Stream construction failure.
///
/// Raised synchronously, before any producer task is spawned.
#[derive(Error, Debug)]
pub enum StreamError {
    /// A raw option failed type validation.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The generator could not be constructed from the supplied parts.
    #[error(transparent)]
    Rng(#[from] BuildError),
}

/// Runtime generation failure.
///
/// Surfaced through the channel's error path; production terminates
/// immediately, with no retry and no partial recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The sampler (or the uniform source behind it) failed.
    #[error(transparent)]
    Sampler(#[from] SampleError),
}
