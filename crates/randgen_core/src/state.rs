//! Generator state buffers and their ownership.
//!
//! A state buffer is a `Vec<u64>` with layout
//! `[s0, s1, s2, s3, seed words...]`: four generator core words followed
//! by the seed material the state was derived from. The minimum length is
//! therefore five words, and buffers derived from longer seed sequences
//! are longer. Length equality is what the replacement logic in
//! [`StreamRng`](crate::rng::StreamRng) branches on.
//!
//! Ownership is an explicit tag: [`StateBuffer::Owned`] is held
//! exclusively by one manager, [`StateBuffer::Shared`] is a cloneable
//! handle that several managers (and the caller) can hold at once. The
//! replacement logic branches on this tag plus a length comparison, never
//! on pointer identity.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StateError;

/// Number of generator core words at the front of every state buffer.
pub const CORE_WORDS: usize = 4;

/// Minimum state buffer length: the core plus at least one seed word.
pub const MIN_STATE_WORDS: usize = CORE_WORDS + 1;

/// Validates a candidate state buffer.
///
/// A buffer must be at least [`MIN_STATE_WORDS`] long and its core words
/// must not all be zero (an all-zero core is a degenerate generator state
/// that would emit zeros forever).
///
/// # Errors
///
/// [`StateError::TooShort`] or [`StateError::ZeroCore`].
pub fn validate_state(words: &[u64]) -> Result<(), StateError> {
    if words.len() < MIN_STATE_WORDS {
        return Err(StateError::TooShort {
            len: words.len(),
            min: MIN_STATE_WORDS,
        });
    }
    if words[..CORE_WORDS].iter().all(|&w| w == 0) {
        return Err(StateError::ZeroCore);
    }
    Ok(())
}

/// A cloneable handle to a state buffer shared between holders.
///
/// Every clone refers to the same underlying buffer: an in-place update
/// through one handle is observed by all of them. This is the mechanism
/// that keeps multiple streams drawing from one generator state.
#[derive(Clone, Debug)]
pub struct SharedState(Arc<Mutex<Vec<u64>>>);

impl SharedState {
    /// Wraps a buffer in a shared handle.
    pub fn new(words: Vec<u64>) -> Self {
        SharedState(Arc::new(Mutex::new(words)))
    }

    /// Runs `f` with mutable access to the underlying buffer.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Vec<u64>) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Returns a copy of the underlying buffer.
    pub fn snapshot(&self) -> Vec<u64> {
        self.with_mut(|words| words.clone())
    }

    /// Current buffer length in words.
    pub fn len(&self) -> usize {
        self.with_mut(|words| words.len())
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ownership-tagged state buffer.
#[derive(Clone, Debug)]
pub enum StateBuffer {
    /// Buffer held exclusively by one manager.
    Owned(Vec<u64>),
    /// Handle to a buffer shared between holders.
    Shared(SharedState),
}

impl StateBuffer {
    /// Buffer length in words.
    pub fn len(&self) -> usize {
        match self {
            StateBuffer::Owned(words) => words.len(),
            StateBuffer::Shared(shared) => shared.len(),
        }
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the buffer contents.
    pub fn snapshot(&self) -> Vec<u64> {
        match self {
            StateBuffer::Owned(words) => words.clone(),
            StateBuffer::Shared(shared) => shared.snapshot(),
        }
    }

    /// Copies `words` element-wise into the buffer.
    ///
    /// For a shared buffer, every co-holder observes the update. The
    /// lengths must match; callers branch on [`len`](Self::len) first.
    pub(crate) fn copy_from(&mut self, words: &[u64]) {
        match self {
            StateBuffer::Owned(own) => own.copy_from_slice(words),
            StateBuffer::Shared(shared) => {
                shared.with_mut(|own| own.copy_from_slice(words));
            }
        }
    }

    /// Runs `f` with mutable access to the buffer contents.
    pub(crate) fn with_mut<R>(&mut self, f: impl FnOnce(&mut [u64]) -> R) -> R {
        match self {
            StateBuffer::Owned(words) => f(words),
            StateBuffer::Shared(shared) => shared.with_mut(|words| f(words)),
        }
    }
}

impl From<Vec<u64>> for StateBuffer {
    fn from(words: Vec<u64>) -> Self {
        StateBuffer::Owned(words)
    }
}

impl From<SharedState> for StateBuffer {
    fn from(shared: SharedState) -> Self {
        StateBuffer::Shared(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_short_buffer() {
        assert_eq!(
            validate_state(&[1, 2, 3]),
            Err(StateError::TooShort { len: 3, min: 5 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_core() {
        // Seed word alone being non-zero does not rescue a dead core.
        assert_eq!(validate_state(&[0, 0, 0, 0, 42]), Err(StateError::ZeroCore));
    }

    #[test]
    fn test_validate_accepts_minimal_buffer() {
        assert!(validate_state(&[1, 0, 0, 0, 42]).is_ok());
    }

    #[test]
    fn test_shared_handle_clones_alias() {
        let a = SharedState::new(vec![1, 2, 3, 4, 5]);
        let b = a.clone();
        a.with_mut(|words| words[0] = 99);
        assert_eq!(b.snapshot()[0], 99);
    }

    #[test]
    fn test_copy_from_updates_shared_in_place() {
        let shared = SharedState::new(vec![1, 2, 3, 4, 5]);
        let mut buffer = StateBuffer::Shared(shared.clone());
        buffer.copy_from(&[9, 9, 9, 9, 9]);
        assert_eq!(shared.snapshot(), vec![9, 9, 9, 9, 9]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let buffer = StateBuffer::Owned(vec![1, 2, 3, 4, 5]);
        let mut snap = buffer.snapshot();
        snap[0] = 7;
        assert_eq!(buffer.snapshot()[0], 1);
    }
}
