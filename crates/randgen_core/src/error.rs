//! Error types for structured error handling.
//!
//! This module provides:
//! - `OptionsError`: type-validation failures in raw option maps
//! - `SeedError`: invalid seed material
//! - `StateError`: invalid or inapplicable state buffers
//! - `BuildError`: generator construction failures
//! - `SampleError`: runtime sampler failures

use thiserror::Error;

/// Type-validation error for a raw option map.
///
/// Raised synchronously before any stream is constructed; names the
/// offending key and the value received. Unrecognised keys never produce
/// errors.
///
/// # Examples
/// ```
/// use randgen_core::error::OptionsError;
///
/// let err = OptionsError::InvalidType {
///     name: "sep",
///     expected: "a string",
///     value: "3".to_string(),
/// };
/// assert_eq!(
///     format!("{}", err),
///     "invalid option `sep`: must be a string, received 3"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// An option key is present with the wrong type or range.
    #[error("invalid option `{name}`: must be {expected}, received {value}")]
    InvalidType {
        /// Offending option key.
        name: &'static str,
        /// Description of the required type.
        expected: &'static str,
        /// The value received, rendered as JSON.
        value: String,
    },
}

impl OptionsError {
    /// Returns the offending option key.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidType { name, .. } => name,
        }
    }
}

/// Invalid seed material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// A seed word sequence must contain at least one word.
    #[error("seed word sequence must not be empty")]
    EmptySeed,
}

/// Invalid or inapplicable generator state buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Candidate buffer is shorter than the minimum state layout.
    #[error("state buffer too short: {len} words, need at least {min}")]
    TooShort {
        /// Length of the rejected buffer.
        len: usize,
        /// Minimum acceptable length.
        min: usize,
    },

    /// The generator core words are all zero, a degenerate state.
    #[error("state buffer core words are all zero")]
    ZeroCore,

    /// The stream wraps an externally supplied uniform source, which this
    /// manager neither owns nor understands.
    #[error("generator state is not accessible for an external uniform source")]
    ExternalSource,
}

/// Generator construction failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Invalid seed material.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Invalid initial state buffer.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Runtime sampler failure.
///
/// Surfaced asynchronously through the channel's error path, terminating
/// production immediately. No retry, no partial recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The sampler rejected the draw.
    #[error("sampler failure: {0}")]
    Failed(String),

    /// The sampler produced a non-finite value.
    #[error("sampler produced a non-finite value: {0}")]
    NonFinite(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_error_names_field() {
        let err = OptionsError::InvalidType {
            name: "highWaterMark",
            expected: "a non-negative number",
            value: "-1".to_string(),
        };
        assert_eq!(err.name(), "highWaterMark");
        let msg = format!("{}", err);
        assert!(msg.contains("highWaterMark"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_state_error_display() {
        let err = StateError::TooShort { len: 2, min: 5 };
        assert_eq!(
            format!("{}", err),
            "state buffer too short: 2 words, need at least 5"
        );
    }

    #[test]
    fn test_build_error_from_seed_error() {
        let err: BuildError = SeedError::EmptySeed.into();
        assert!(matches!(err, BuildError::Seed(SeedError::EmptySeed)));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SampleError::Failed("rate must be positive".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
