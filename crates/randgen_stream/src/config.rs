//! Resolved stream configuration.
//!
//! [`StreamConfig`] is the immutable configuration a stream runs with.
//! It is produced either from a validated [`StreamOptions`] record via
//! [`StreamConfig::resolve`] (defaults applied here, not during
//! validation) or through [`StreamConfigBuilder`].

use randgen_core::error::OptionsError;
use randgen_core::options::{Encoding, StreamOptions};

/// Default backpressure threshold, in buffered items.
///
/// This is the collaborator channel's default capacity when no
/// `highWaterMark` is configured.
pub const DEFAULT_HIGH_WATER_MARK: usize = 16;

/// Default separator appended to each text-mode chunk.
pub const DEFAULT_SEP: &str = "\n";

/// Immutable stream configuration.
///
/// # Examples
///
/// ```rust
/// use randgen_stream::config::StreamConfig;
///
/// let config = StreamConfig::builder()
///     .iter(100)
///     .siter(10)
///     .object_mode(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.iter(), Some(100));
/// assert_eq!(config.siter(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct StreamConfig {
    sep: String,
    object_mode: bool,
    encoding: Encoding,
    high_water_mark: usize,
    iter: Option<u64>,
    siter: u64,
    copy: bool,
}

impl StreamConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::default()
    }

    /// Resolves validated options into a configuration, applying
    /// defaults for every unset field.
    ///
    /// Defaults: separator `"\n"`, object mode off, no encoding,
    /// high-water mark [`DEFAULT_HIGH_WATER_MARK`], unbounded
    /// iterations, snapshot interval `u64::MAX` (effectively never).
    pub fn resolve(opts: &StreamOptions) -> Self {
        StreamConfig {
            sep: opts.sep.clone().unwrap_or_else(|| DEFAULT_SEP.to_string()),
            object_mode: opts.object_mode.unwrap_or(false),
            encoding: opts.encoding.clone().unwrap_or(Encoding::None),
            high_water_mark: opts
                .high_water_mark
                .map(|hwm| hwm as usize)
                .unwrap_or(DEFAULT_HIGH_WATER_MARK),
            iter: opts.iter,
            siter: opts.siter.unwrap_or(u64::MAX),
            copy: opts.copy.unwrap_or(true),
        }
    }

    /// Separator appended to each value in text mode.
    #[inline]
    pub fn sep(&self) -> &str {
        &self.sep
    }

    /// Whether raw numeric values are emitted instead of text chunks.
    #[inline]
    pub fn object_mode(&self) -> bool {
        self.object_mode
    }

    /// Encoding for text-mode chunks.
    #[inline]
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Backpressure threshold, in buffered items.
    #[inline]
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Total-iteration cap; `None` is unbounded.
    #[inline]
    pub fn iter(&self) -> Option<u64> {
        self.iter
    }

    /// Produced values between consecutive state notifications.
    #[inline]
    pub fn siter(&self) -> u64 {
        self.siter
    }

    /// Whether caller-supplied state is cloned rather than referenced.
    #[inline]
    pub fn copy(&self) -> bool {
        self.copy
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig::resolve(&StreamOptions::default())
    }
}

/// Builder for [`StreamConfig`].
#[derive(Clone, Debug, Default)]
pub struct StreamConfigBuilder {
    sep: Option<String>,
    object_mode: Option<bool>,
    encoding: Option<Encoding>,
    high_water_mark: Option<usize>,
    iter: Option<u64>,
    siter: Option<u64>,
    copy: Option<bool>,
}

impl StreamConfigBuilder {
    /// Sets the separator appended to each text-mode value.
    #[inline]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = Some(sep.into());
        self
    }

    /// Enables or disables object mode.
    #[inline]
    pub fn object_mode(mut self, object_mode: bool) -> Self {
        self.object_mode = Some(object_mode);
        self
    }

    /// Sets the chunk encoding.
    #[inline]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the backpressure threshold, in buffered items.
    #[inline]
    pub fn high_water_mark(mut self, high_water_mark: usize) -> Self {
        self.high_water_mark = Some(high_water_mark);
        self
    }

    /// Caps the total number of produced values.
    #[inline]
    pub fn iter(mut self, iter: u64) -> Self {
        self.iter = Some(iter);
        self
    }

    /// Sets the snapshot interval.
    #[inline]
    pub fn siter(mut self, siter: u64) -> Self {
        self.siter = Some(siter);
        self
    }

    /// Sets the copy flag for caller-supplied state.
    #[inline]
    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = Some(copy);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// [`OptionsError`] if `siter` is zero.
    pub fn build(self) -> Result<StreamConfig, OptionsError> {
        if self.siter == Some(0) {
            return Err(OptionsError::InvalidType {
                name: "siter",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }
        Ok(StreamConfig {
            sep: self.sep.unwrap_or_else(|| DEFAULT_SEP.to_string()),
            object_mode: self.object_mode.unwrap_or(false),
            encoding: self.encoding.unwrap_or(Encoding::None),
            high_water_mark: self.high_water_mark.unwrap_or(DEFAULT_HIGH_WATER_MARK),
            iter: self.iter,
            siter: self.siter.unwrap_or(u64::MAX),
            copy: self.copy.unwrap_or(true),
        })
    }
}
