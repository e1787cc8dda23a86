//! Host wall-clock abstraction.

use symphony_core::Timestamp;
use tokio::time::Instant;

/// Source of the timestamps stamped on beats and taps.
///
/// The runtime only compares timestamps from the same source, so the origin
/// is arbitrary.
pub trait TimeSource: Send + Sync + 'static {
    fn now(&self) -> Timestamp;
}

/// Monotonic clock backed by [`tokio::time::Instant`].
///
/// Honors paused test time, so beat timing can be exercised without real
/// delays.
#[derive(Clone, Copy, Debug)]
pub struct TokioTimeSource {
    origin: Instant,
}

impl TokioTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TokioTimeSource {
    fn now(&self) -> Timestamp {
        let elapsed = Instant::now().saturating_duration_since(self.origin);
        Timestamp::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }
}
