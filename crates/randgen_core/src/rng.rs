//! Managed uniform source with observable, resumable state.
//!
//! [`StreamRng`] is the generator-state manager behind every stream: it
//! establishes the seed/state at construction, steps a xoshiro256**
//! generator over the state buffer in place, and supports replacing the
//! state at runtime with the length-aware semantics that keep shared
//! buffers shared.
//!
//! # Construction precedence
//!
//! 1. An externally supplied uniform source is used verbatim; seed and
//!    state accessors all report `None`, because this manager neither
//!    owns nor understands that source's internal state.
//! 2. Else an initial state buffer is used: cloned when `copy = true`,
//!    kept as given (including a shared handle) when `copy = false`. Any
//!    supplied seed is ignored.
//! 3. Else a seed (explicit or entropy-generated) derives a fresh state
//!    buffer, exclusively owned regardless of the copy flag; there is
//!    nothing to share yet.
//!
//! # Replacement semantics
//!
//! `set_state` branches on the ownership tag plus a length comparison:
//! a shared buffer replaced with a same-length buffer is updated
//! element-wise in place (every co-holder observes the update); a
//! different-length buffer rebinds this manager only, leaving co-holders
//! on the old buffer. Naive replacement-by-reference would silently break
//! the sharing relationship; naive replacement-by-copy would prevent
//! rebinding to a differently-sized state. Both paths are supported and
//! chosen on length equality alone.

use rand::RngCore;

use crate::error::{BuildError, StateError};
use crate::seed::Seed;
use crate::state::{validate_state, StateBuffer, CORE_WORDS};

const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Denominator for the 53-bit u64 to f64 conversion.
const F64_DENOM: f64 = (1u64 << 53) as f64;

/// Advances a splitmix64 stream and returns the next output.
fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(SPLITMIX_GAMMA);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// One xoshiro256** step over the four core words of a state buffer.
fn step(words: &mut [u64]) -> u64 {
    let result = words[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
    let t = words[1] << 17;
    words[2] ^= words[0];
    words[3] ^= words[1];
    words[1] ^= words[2];
    words[0] ^= words[3];
    words[2] ^= t;
    words[3] = words[3].rotate_left(45);
    result
}

/// Derives a state buffer from seed words.
///
/// The seed words are folded into a splitmix64 stream which is expanded
/// into the four core words (the standard xoshiro seeding recipe), then
/// the seed words themselves are appended so that any snapshot of the
/// buffer carries its own provenance.
fn derive_state(seed_words: &[u64]) -> Vec<u64> {
    let mut x: u64 = 0;
    for &word in seed_words {
        x = splitmix64(&mut x) ^ word;
    }
    let mut state = Vec::with_capacity(CORE_WORDS + seed_words.len());
    for _ in 0..CORE_WORDS {
        state.push(splitmix64(&mut x));
    }
    if state.iter().all(|&w| w == 0) {
        // Unreachable for any realistic splitmix output; guards the
        // degenerate all-zero xoshiro state.
        state[0] = SPLITMIX_GAMMA;
    }
    state.extend_from_slice(seed_words);
    state
}

enum Source {
    /// Externally supplied uniform source, used verbatim.
    External(Box<dyn RngCore + Send>),
    /// Internally managed generator stepping the state buffer in place.
    Internal { buffer: StateBuffer },
}

/// The stream's uniform source with managed, resumable state.
///
/// Implements [`rand::RngCore`], so any `rand_distr` distribution can
/// sample from it directly.
///
/// # Examples
///
/// ```rust
/// use randgen_core::rng::StreamRng;
/// use randgen_core::seed::Seed;
/// use randgen_core::state::StateBuffer;
///
/// let mut rng = StreamRng::from_seed(&Seed::Scalar(1234)).unwrap();
/// let before = rng.state().unwrap();
/// let first = rng.next_f64();
///
/// // Restoring the snapshot resumes the identical continuation.
/// rng.set_state(StateBuffer::Owned(before)).unwrap();
/// assert_eq!(rng.next_f64(), first);
/// ```
pub struct StreamRng {
    source: Source,
    copy: bool,
}

impl StreamRng {
    /// Wraps an externally supplied uniform source.
    ///
    /// Seed and state accessors report `None` for the lifetime of this
    /// manager, and [`set_state`](Self::set_state) fails.
    pub fn external(prng: Box<dyn RngCore + Send>) -> Self {
        StreamRng {
            source: Source::External(prng),
            copy: true,
        }
    }

    /// Initialises the generator from an existing state buffer.
    ///
    /// With `copy = true` the contents are cloned into an exclusively
    /// owned buffer, isolated from anything the caller holds. With
    /// `copy = false` the buffer is kept as given; a
    /// [`SharedState`](crate::state::SharedState) handle stays shared
    /// with every other holder.
    ///
    /// # Errors
    ///
    /// [`StateError`] if the buffer is too short or has an all-zero core.
    pub fn from_state(state: StateBuffer, copy: bool) -> Result<Self, StateError> {
        let words = state.snapshot();
        validate_state(&words)?;
        let buffer = if copy { StateBuffer::Owned(words) } else { state };
        Ok(StreamRng {
            source: Source::Internal { buffer },
            copy,
        })
    }

    /// Derives a fresh, exclusively owned state from seed material.
    ///
    /// # Errors
    ///
    /// [`SeedError`](crate::error::SeedError) for invalid seed material.
    pub fn from_seed(seed: &Seed) -> Result<Self, crate::error::SeedError> {
        seed.validate()?;
        Ok(StreamRng {
            source: Source::Internal {
                buffer: StateBuffer::Owned(derive_state(&seed.to_words())),
            },
            copy: true,
        })
    }

    /// Derives a fresh state from an entropy-generated scalar seed.
    pub fn from_entropy() -> Self {
        StreamRng {
            source: Source::Internal {
                buffer: StateBuffer::Owned(derive_state(&Seed::from_entropy().to_words())),
            },
            copy: true,
        }
    }

    /// Builds a manager from optional parts, applying the construction
    /// precedence: external source, then state buffer, then seed, then
    /// an entropy-generated seed.
    ///
    /// # Errors
    ///
    /// [`BuildError`] wrapping the seed or state validation failure.
    pub fn from_parts(
        prng: Option<Box<dyn RngCore + Send>>,
        state: Option<StateBuffer>,
        seed: Option<Seed>,
        copy: bool,
    ) -> Result<Self, BuildError> {
        if let Some(prng) = prng {
            return Ok(StreamRng::external(prng));
        }
        if let Some(state) = state {
            return Ok(StreamRng::from_state(state, copy)?);
        }
        let mut rng = match seed {
            Some(seed) => StreamRng::from_seed(&seed)?,
            None => StreamRng::from_entropy(),
        };
        rng.copy = copy;
        Ok(rng)
    }

    /// Whether this manager wraps an externally supplied source.
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(self.source, Source::External(_))
    }

    /// The seed words the current state was derived from, or `None` for
    /// an external source.
    pub fn seed(&self) -> Option<Vec<u64>> {
        match &self.source {
            Source::External(_) => None,
            Source::Internal { buffer } => {
                let words = buffer.snapshot();
                Some(words[CORE_WORDS..].to_vec())
            }
        }
    }

    /// Number of seed words, or `None` for an external source.
    pub fn seed_length(&self) -> Option<usize> {
        self.seed().map(|words| words.len())
    }

    /// A snapshot of the current state buffer, or `None` for an external
    /// source.
    pub fn state(&self) -> Option<Vec<u64>> {
        match &self.source {
            Source::External(_) => None,
            Source::Internal { buffer } => Some(buffer.snapshot()),
        }
    }

    /// State buffer length in words, or `None` for an external source.
    pub fn state_length(&self) -> Option<usize> {
        match &self.source {
            Source::External(_) => None,
            Source::Internal { buffer } => Some(buffer.len()),
        }
    }

    /// State buffer size in bytes, or `None` for an external source.
    pub fn byte_length(&self) -> Option<usize> {
        self.state_length()
            .map(|len| len * std::mem::size_of::<u64>())
    }

    /// Replaces the generator state.
    ///
    /// - Shared buffer, same length: the contents are copied
    ///   element-wise into the existing shared buffer, and all
    ///   co-holders observe the update.
    /// - Different length: this manager rebinds to `new` (or an owned
    ///   clone of it, when `copy = true`); co-holders keep the old
    ///   buffer.
    /// - Exclusive buffer: re-cloned or re-referenced per the copy flag.
    ///
    /// On error the active state is left untouched.
    ///
    /// # Errors
    ///
    /// [`StateError::ExternalSource`] for an external source, or the
    /// validation failure for an unacceptable buffer.
    pub fn set_state(&mut self, new: StateBuffer) -> Result<(), StateError> {
        let words = new.snapshot();
        validate_state(&words)?;
        let buffer = match &mut self.source {
            Source::External(_) => return Err(StateError::ExternalSource),
            Source::Internal { buffer } => buffer,
        };
        let same_length = buffer.len() == words.len();
        if same_length && matches!(buffer, StateBuffer::Shared(_)) {
            buffer.copy_from(&words);
        } else {
            *buffer = if self.copy {
                StateBuffer::Owned(words)
            } else {
                new
            };
        }
        Ok(())
    }

    /// Draws one uniform value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.generate() >> 11) as f64 / F64_DENOM
    }

    fn generate(&mut self) -> u64 {
        match &mut self.source {
            Source::External(rng) => rng.next_u64(),
            Source::Internal { buffer } => buffer.with_mut(step),
        }
    }
}

impl RngCore for StreamRng {
    fn next_u32(&mut self) -> u32 {
        (self.generate() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.generate()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.generate().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
