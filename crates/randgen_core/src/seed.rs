//! Seed material for the internal uniform generator.
//!
//! A seed is either a single 64-bit word or a non-empty word sequence.
//! The word form is what gets folded into the derived state buffer, and
//! it is recoverable from any state snapshot (the buffer carries its seed
//! words after the generator core).

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::SeedError;

/// Seed material: a scalar word or a word sequence.
///
/// # Examples
///
/// ```rust
/// use randgen_core::seed::Seed;
///
/// let scalar = Seed::Scalar(42);
/// assert_eq!(scalar.to_words(), vec![42]);
///
/// let words = Seed::Words(vec![1, 2, 3]);
/// assert_eq!(words.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// A single 64-bit seed word.
    Scalar(u64),
    /// A sequence of seed words. Must be non-empty.
    Words(Vec<u64>),
}

impl Seed {
    /// Generates a fresh scalar seed from OS entropy.
    ///
    /// This is an explicit constructor call made at stream construction
    /// time; there is no process-global generator state behind it.
    pub fn from_entropy() -> Self {
        Seed::Scalar(OsRng.next_u64())
    }

    /// Returns the seed as a word vector.
    pub fn to_words(&self) -> Vec<u64> {
        match self {
            Seed::Scalar(word) => vec![*word],
            Seed::Words(words) => words.clone(),
        }
    }

    /// Number of seed words.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Seed::Scalar(_) => 1,
            Seed::Words(words) => words.len(),
        }
    }

    /// Whether the seed carries no words. Only possible for an empty
    /// word sequence, which is invalid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates the seed material.
    ///
    /// # Errors
    ///
    /// [`SeedError::EmptySeed`] for an empty word sequence.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.is_empty() {
            return Err(SeedError::EmptySeed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_to_words() {
        assert_eq!(Seed::Scalar(7).to_words(), vec![7]);
        assert_eq!(Seed::Scalar(7).len(), 1);
    }

    #[test]
    fn test_word_sequence() {
        let seed = Seed::Words(vec![1, 2, 3]);
        assert_eq!(seed.to_words(), vec![1, 2, 3]);
        assert_eq!(seed.len(), 3);
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_empty_sequence_invalid() {
        let seed = Seed::Words(vec![]);
        assert!(seed.is_empty());
        assert_eq!(seed.validate(), Err(SeedError::EmptySeed));
    }

    #[test]
    fn test_entropy_seeds_differ() {
        // Two entropy draws colliding is effectively impossible.
        let a = Seed::from_entropy();
        let b = Seed::from_entropy();
        assert_ne!(a, b);
    }
}
