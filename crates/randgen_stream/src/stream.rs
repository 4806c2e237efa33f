//! The public stream handle.
//!
//! [`RandomStream`] constructs the generator, spawns the producer task
//! onto the ambient tokio runtime, and hands the consumer the receiving
//! half of the bounded channel plus the generator-state accessor
//! surface.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use randgen_core::error::StateError;
use randgen_core::options::StreamOptions;
use randgen_core::rng::StreamRng;
use randgen_core::sampler::Sampler;
use randgen_core::state::StateBuffer;

use crate::config::StreamConfig;
use crate::error::{GenerateError, StreamError};
use crate::item::StreamItem;
use crate::limiter::IterationLimiter;
use crate::producer::ChunkProducer;
use crate::snapshot::SnapshotClock;

/// A backpressure-aware stream of pseudorandom values.
///
/// Values are produced by a cooperative task, buffered up to the
/// high-water mark, and consumed through [`recv`](Self::recv). State
/// notifications ride the same channel in production order, so a
/// consumer may receive a [`StreamItem::State`] describing a generator
/// state ahead of the values it has consumed so far. This is
/// intentional: capture happens at production time.
///
/// Dropping the handle cancels production immediately; a partially
/// filled snapshot interval is discarded, not flushed.
pub struct RandomStream {
    rx: mpsc::Receiver<Result<StreamItem, GenerateError>>,
    rng: Arc<Mutex<StreamRng>>,
    task: JoinHandle<()>,
}

impl RandomStream {
    /// Constructs a stream and spawns its producer.
    ///
    /// Must be called within a tokio runtime. Defaults are applied to
    /// every unset option; the generator is built with the construction
    /// precedence documented on [`StreamRng`].
    ///
    /// # Errors
    ///
    /// [`StreamError`] if the generator parts are invalid. No task is
    /// spawned on error.
    pub fn new<S>(options: StreamOptions, sampler: S) -> Result<Self, StreamError>
    where
        S: Sampler + 'static,
    {
        let config = StreamConfig::resolve(&options);
        let rng = StreamRng::from_parts(options.prng, options.state, options.seed, config.copy())?;
        let rng = Arc::new(Mutex::new(rng));

        let (tx, rx) = mpsc::channel(config.high_water_mark().max(1));
        let limiter = IterationLimiter::new(config.iter());
        let clock = SnapshotClock::new(config.siter());
        debug!(
            "spawning producer: iter={:?} siter={} hwm={}",
            config.iter(),
            config.siter(),
            config.high_water_mark()
        );
        let producer = ChunkProducer {
            config,
            rng: Arc::clone(&rng),
            sampler,
            limiter,
            clock,
            tx,
        };
        let task = tokio::spawn(producer.run());

        Ok(RandomStream { rx, rng, task })
    }

    /// Validates a raw option map and constructs a stream from it.
    ///
    /// The generator wiring options (`prng`, `seed`, `state`, `copy`)
    /// cannot travel in a raw map; streams needing them go through
    /// [`new`](Self::new) with a populated [`StreamOptions`].
    ///
    /// # Errors
    ///
    /// [`StreamError`] for a type-validation failure, naming the
    /// offending key and value.
    pub fn from_map<S>(map: &Map<String, Value>, sampler: S) -> Result<Self, StreamError>
    where
        S: Sampler + 'static,
    {
        let options = StreamOptions::from_map(map)?;
        RandomStream::new(options, sampler)
    }

    /// Receives the next emission.
    ///
    /// Returns `None` once the stream has ended: iteration cap reached,
    /// production terminated by an error (delivered first), or the
    /// stream closed.
    pub async fn recv(&mut self) -> Option<Result<StreamItem, GenerateError>> {
        self.rx.recv().await
    }

    /// Cancels production immediately.
    ///
    /// No further values are produced; any pending state notification
    /// for a partially filled interval is discarded, not flushed.
    /// Emissions already buffered in the channel remain receivable.
    pub fn close(&mut self) {
        self.task.abort();
        self.rx.close();
    }

    /// Handle to the active uniform source.
    ///
    /// The source itself is read-only in the sense that it cannot be
    /// swapped after construction; its state is managed through
    /// [`state`](Self::state) and [`set_state`](Self::set_state).
    pub fn source(&self) -> Arc<Mutex<StreamRng>> {
        Arc::clone(&self.rng)
    }

    /// Seed words behind the current state, or `None` when an external
    /// uniform source was supplied.
    pub fn seed(&self) -> Option<Vec<u64>> {
        self.lock_rng().seed()
    }

    /// Number of seed words, or `None` for an external source.
    pub fn seed_length(&self) -> Option<usize> {
        self.lock_rng().seed_length()
    }

    /// Snapshot of the current generator state, or `None` for an
    /// external source.
    pub fn state(&self) -> Option<Vec<u64>> {
        self.lock_rng().state()
    }

    /// State buffer length in words, or `None` for an external source.
    pub fn state_length(&self) -> Option<usize> {
        self.lock_rng().state_length()
    }

    /// State buffer size in bytes, or `None` for an external source.
    pub fn byte_length(&self) -> Option<usize> {
        self.lock_rng().byte_length()
    }

    /// Replaces the generator state, with the shared-buffer replacement
    /// semantics documented on [`StreamRng::set_state`].
    ///
    /// # Errors
    ///
    /// [`StateError`] for an invalid buffer or an external source.
    pub fn set_state(&self, new: StateBuffer) -> Result<(), StateError> {
        self.lock_rng().set_state(new)
    }

    fn lock_rng(&self) -> MutexGuard<'_, StreamRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RandomStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
