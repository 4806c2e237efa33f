//! The chunk producer loop.
//!
//! One producer task per stream. Each iteration claims a production slot
//! from the limiter, draws a value through the sampler, formats it per
//! the configuration, and sends it down the bounded channel. The
//! `send().await` is the backpressure suspension point: when the buffer
//! is at capacity, production suspends until the consumer drains it.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use randgen_core::options::Encoding;
use randgen_core::rng::StreamRng;
use randgen_core::sampler::Sampler;

use crate::config::StreamConfig;
use crate::error::GenerateError;
use crate::item::StreamItem;
use crate::limiter::IterationLimiter;
use crate::snapshot::SnapshotClock;

pub(crate) struct ChunkProducer<S> {
    pub(crate) config: StreamConfig,
    pub(crate) rng: Arc<Mutex<StreamRng>>,
    pub(crate) sampler: S,
    pub(crate) limiter: IterationLimiter,
    pub(crate) clock: SnapshotClock,
    pub(crate) tx: mpsc::Sender<Result<StreamItem, GenerateError>>,
}

impl<S> ChunkProducer<S>
where
    S: Sampler,
{
    pub(crate) async fn run(mut self) {
        let mut produced: u64 = 0;
        loop {
            if !self.limiter.try_claim() {
                debug!("iteration cap reached after {} values", produced);
                return;
            }

            // Lock held only for the synchronous draw, never across an
            // await point.
            let drawn = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                self.sampler.draw(&mut *rng)
            };
            let value = match drawn {
                Ok(value) => value,
                Err(err) => {
                    debug!("generation failed: {}", err);
                    let _ = self.tx.send(Err(GenerateError::Sampler(err))).await;
                    return;
                }
            };

            let item = self.make_item(value);
            if self.tx.send(Ok(item)).await.is_err() {
                debug!("receiver dropped after {} values; production cancelled", produced);
                return;
            }
            produced += 1;

            if self.clock.record() {
                let snapshot = {
                    let rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    rng.state()
                };
                // An external uniform source has no observable state to
                // snapshot; the notification is skipped.
                if let Some(words) = snapshot {
                    if self.tx.send(Ok(StreamItem::State(words))).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    fn make_item(&self, value: f64) -> StreamItem {
        if self.config.object_mode() {
            return StreamItem::Value(value);
        }
        let mut text = value.to_string();
        text.push_str(self.config.sep());
        match self.config.encoding() {
            Encoding::None => StreamItem::Text(text),
            Encoding::Named(_) => StreamItem::Bytes(text.into_bytes()),
        }
    }
}
