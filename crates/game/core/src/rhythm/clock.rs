//! Fixed-tempo beat clock.

use crate::config::MatchConfig;
use crate::state::{Beat, Timestamp};

/// Beat counter plus the wall-clock reference of the latest beat.
///
/// The clock is the sole writer of the beat reference time; timing
/// judgement only reads it. Ticking is driven from outside (the runtime's
/// interval timer, or tests stepping beat by beat).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatClock {
    period_ms: u64,
    beat: Beat,
    last_beat_at: Timestamp,
}

impl BeatClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            beat: Beat::ZERO,
            last_beat_at: Timestamp::ZERO,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.beat_period_ms())
    }

    /// Resets the counter and anchors the beat grid at `now`.
    pub fn start(&mut self, now: Timestamp) {
        self.beat = Beat::ZERO;
        self.last_beat_at = now;
    }

    /// Records `now` as the beat reference and advances the counter.
    pub fn tick(&mut self, now: Timestamp) -> Beat {
        self.last_beat_at = now;
        self.beat = self.beat.next();
        self.beat
    }

    pub fn beat(&self) -> Beat {
        self.beat
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn last_beat_at(&self) -> Timestamp {
        self.last_beat_at
    }

    /// Expected time of the next tick.
    pub fn next_beat_at(&self) -> Timestamp {
        self.last_beat_at + self.period_ms
    }

    /// Distance in milliseconds from `at` to the nearest beat boundary,
    /// whether already past or upcoming.
    ///
    /// Inputs stamped before the latest beat count as on-beat. Inputs more
    /// than one period late are measured against the periodic grid.
    pub fn offset_to_nearest_beat(&self, at: Timestamp) -> u64 {
        let since_prior = at.millis_since(self.last_beat_at) % self.period_ms;
        let to_next = self.period_ms - since_prior;
        since_prior.min(to_next)
    }
}

impl Default for BeatClock {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}
