//! Iteration cap bookkeeping.

/// Caps total values produced when a finite count is configured.
///
/// `None` means unbounded: production only ends through cancellation.
/// A cap of zero is legal and means the stream ends before producing
/// anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationLimiter {
    remaining: Option<u64>,
}

impl IterationLimiter {
    /// Creates a limiter for the given cap.
    pub fn new(cap: Option<u64>) -> Self {
        IterationLimiter { remaining: cap }
    }

    /// Claims one production slot.
    ///
    /// Returns `false` once the cap is exhausted; the producer must end
    /// the stream regardless of pending demand.
    pub fn try_claim(&mut self) -> bool {
        match &mut self.remaining {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }

    /// Whether the cap has been exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}
