//! # randgen_stream: Backpressure-Aware Pseudorandom Value Streams
//!
//! ## Engine Layer Role
//!
//! randgen_stream drives the foundation layer's managed generator through
//! a bounded producer/consumer channel:
//! - Immutable resolved configuration with defaults (`config`)
//! - The chunk producer loop (`producer`)
//! - Iteration caps (`limiter`) and snapshot scheduling (`snapshot`)
//! - Emitted items and notifications (`item`)
//! - The public [`RandomStream`](stream::RandomStream) handle (`stream`)
//!
//! ## Emission Timing
//!
//! State notifications are emitted relative to **production**, not
//! consumption. The channel may buffer values ahead of what a consumer
//! has read, so a notification can describe a generator state ahead of
//! the values consumed so far. This is intentional, documented behaviour:
//! state-capture-at-a-specific-read-offset is not a guarantee this crate
//! provides.
//!
//! ## Usage Example
//!
//! ```rust
//! use randgen_core::sampler::DistributionSampler;
//! use randgen_core::seed::Seed;
//! use randgen_core::options::StreamOptions;
//! use randgen_stream::item::StreamItem;
//! use randgen_stream::stream::RandomStream;
//! use rand_distr::Exp;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut options = StreamOptions::default();
//! options.iter = Some(3);
//! options.object_mode = Some(true);
//! options.seed = Some(Seed::Scalar(42));
//!
//! let sampler = DistributionSampler::new(Exp::new(1.0).unwrap());
//! let mut stream = RandomStream::new(options, sampler).unwrap();
//!
//! let mut values = Vec::new();
//! while let Some(item) = stream.recv().await {
//!     if let StreamItem::Value(v) = item.unwrap() {
//!         values.push(v);
//!     }
//! }
//! assert_eq!(values.len(), 3);
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod item;
pub mod limiter;
mod producer;
pub mod snapshot;
pub mod stream;

pub use config::{StreamConfig, StreamConfigBuilder, DEFAULT_HIGH_WATER_MARK};
pub use error::{GenerateError, StreamError};
pub use item::StreamItem;
pub use stream::RandomStream;
