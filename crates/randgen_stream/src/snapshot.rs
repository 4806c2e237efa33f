//! Snapshot scheduling relative to production.

/// Fires after every N produced values, where N is the snapshot
/// interval.
///
/// The counter advances on production, never on consumption: the channel
/// may buffer values a consumer has not read yet, and the notification
/// deliberately reflects the generator state at production time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotClock {
    interval: u64,
    ticks: u64,
}

impl SnapshotClock {
    /// Creates a clock firing every `interval` productions.
    ///
    /// The interval is a positive integer; configuration resolution
    /// guarantees that before the clock is built.
    pub fn new(interval: u64) -> Self {
        SnapshotClock { interval, ticks: 0 }
    }

    /// Records one production. Returns `true` when a snapshot is due,
    /// resetting the counter.
    pub fn record(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.interval {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}
