//! Raw option validation.
//!
//! This module turns a raw, dynamically-typed option map into the typed
//! [`StreamOptions`] record. Validation is purely about types and ranges;
//! no defaulting happens here. Defaults are the responsibility of the
//! constructing component (the engine layer's `StreamConfig`).
//!
//! Six keys are validated, in a fixed order with first-failure
//! short-circuit: `sep`, `objectMode`, `encoding`, `highWaterMark`,
//! `iter`, `siter`. The generator wiring fields (`prng`, `seed`, `state`,
//! `copy`) are typed fields set directly on the record; their validity is
//! enforced by [`StreamRng`](crate::rng::StreamRng) at construction, not
//! here.
//!
//! Unrecognised keys are silently ignored. This is a deliberate
//! forward-compatibility decision: callers may carry extra keys for their
//! own purposes.

use serde_json::{Map, Value};

use crate::error::OptionsError;
use crate::seed::Seed;
use crate::state::StateBuffer;
use rand::RngCore;

/// Text encoding selector for emitted chunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// No encoding: chunks are emitted as text.
    None,
    /// A named encoding: chunks are emitted as bytes. Only `"utf8"` is
    /// meaningfully supported.
    Named(String),
}

/// Destination record for validated stream options.
///
/// All fields are optional; a field absent from the raw map is left
/// unset. The engine layer applies defaults when resolving this record
/// into its immutable configuration.
#[derive(Default)]
pub struct StreamOptions {
    /// Separator appended to each value in text mode.
    pub sep: Option<String>,
    /// Emit raw numeric values instead of text chunks.
    pub object_mode: Option<bool>,
    /// Encoding for text-mode chunks.
    pub encoding: Option<Encoding>,
    /// Backpressure threshold, in buffered items.
    pub high_water_mark: Option<f64>,
    /// Total-iteration cap. `None` means unbounded; 0 is a legal cap
    /// meaning "produce nothing".
    pub iter: Option<u64>,
    /// Produced values between consecutive state notifications.
    pub siter: Option<u64>,
    /// Externally supplied uniform source, used verbatim when present.
    pub prng: Option<Box<dyn RngCore + Send>>,
    /// Seed material for the internal generator.
    pub seed: Option<Seed>,
    /// Initial generator state buffer.
    pub state: Option<StateBuffer>,
    /// Clone caller-supplied state (`true`) or reference it in place
    /// (`false`).
    pub copy: Option<bool>,
}

impl std::fmt::Debug for StreamOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamOptions")
            .field("sep", &self.sep)
            .field("object_mode", &self.object_mode)
            .field("encoding", &self.encoding)
            .field("high_water_mark", &self.high_water_mark)
            .field("iter", &self.iter)
            .field("siter", &self.siter)
            .field("prng", &self.prng.as_ref().map(|_| "<external>"))
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("copy", &self.copy)
            .finish()
    }
}

impl StreamOptions {
    /// Validates a raw option map into a `StreamOptions` record.
    ///
    /// Checks run in a fixed order (`sep`, `objectMode`, `encoding`,
    /// `highWaterMark`, `iter`, `siter`); the first failure
    /// short-circuits. Absent keys leave the field unset, and
    /// unrecognised keys are ignored.
    ///
    /// # Errors
    ///
    /// [`OptionsError::InvalidType`] naming the offending key and the
    /// value received.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randgen_core::options::StreamOptions;
    /// use serde_json::json;
    ///
    /// let map = json!({ "sep": ",", "iter": 10, "ignored": [1, 2] });
    /// let opts = StreamOptions::from_map(map.as_object().unwrap()).unwrap();
    /// assert_eq!(opts.sep.as_deref(), Some(","));
    /// assert_eq!(opts.iter, Some(10));
    /// assert_eq!(opts.siter, None);
    /// ```
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, OptionsError> {
        let mut opts = StreamOptions::default();

        if let Some(v) = map.get("sep") {
            match v.as_str() {
                Some(s) => opts.sep = Some(s.to_string()),
                None => return Err(invalid("sep", "a string", v)),
            }
        }
        if let Some(v) = map.get("objectMode") {
            match v.as_bool() {
                Some(b) => opts.object_mode = Some(b),
                None => return Err(invalid("objectMode", "a boolean", v)),
            }
        }
        if let Some(v) = map.get("encoding") {
            if v.is_null() {
                opts.encoding = Some(Encoding::None);
            } else if let Some(s) = v.as_str() {
                opts.encoding = Some(Encoding::Named(s.to_string()));
            } else {
                return Err(invalid("encoding", "a string or null", v));
            }
        }
        if let Some(v) = map.get("highWaterMark") {
            match v.as_f64() {
                Some(n) if n >= 0.0 && n.is_finite() => opts.high_water_mark = Some(n),
                _ => return Err(invalid("highWaterMark", "a non-negative number", v)),
            }
        }
        if let Some(v) = map.get("iter") {
            match v.as_u64() {
                Some(n) => opts.iter = Some(n),
                None => return Err(invalid("iter", "a non-negative integer", v)),
            }
        }
        if let Some(v) = map.get("siter") {
            match v.as_u64() {
                Some(n) if n >= 1 => opts.siter = Some(n),
                _ => return Err(invalid("siter", "a positive integer", v)),
            }
        }

        Ok(opts)
    }
}

fn invalid(name: &'static str, expected: &'static str, value: &Value) -> OptionsError {
    OptionsError::InvalidType {
        name,
        expected,
        value: value.to_string(),
    }
}
