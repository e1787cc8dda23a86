use std::fmt;

use crate::config::MatchConfig;

/// Discrete time unit of the match: one tick of the fixed-tempo clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beat(pub u64);

impl Beat {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the following beat.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// 1-based measure containing this beat.
    ///
    /// Beat 0 (before the first tick) is reported as measure 1.
    pub const fn measure(self) -> u64 {
        self.0.saturating_sub(1) / MatchConfig::BEATS_PER_MEASURE + 1
    }

    /// Returns true for the first beat of every measure (1, 5, 9, ...).
    pub const fn is_measure_boundary(self) -> bool {
        self.0 >= 1 && (self.0 - 1) % MatchConfig::BEATS_PER_MEASURE == 0
    }

    /// Returns true if a unit with the given action interval acts on this beat.
    ///
    /// Beat 0 is never resolved, so it never counts as an action beat.
    pub const fn is_action_beat(self, interval: u32) -> bool {
        self.0 >= 1 && interval > 0 && self.0 % interval as u64 == 0
    }
}

impl fmt::Display for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host wall-clock instant in milliseconds.
///
/// The origin is chosen by the host; only differences are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, or 0 if `earlier` is in the future.
    pub const fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Damage/heal multiplier stored in hundredths (`150` is x1.5).
///
/// All combat math is integer-only: `apply` computes `floor(value * m)`
/// exactly, which keeps beat resolution reproducible across platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Multiplier(u32);

impl Multiplier {
    pub const HALF: Self = Self(50);
    pub const NEUTRAL: Self = Self(100);
    pub const STRONG: Self = Self(150);
    pub const DOUBLE: Self = Self(200);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Returns `floor(value * self)`, saturating at `u32::MAX`.
    #[inline]
    pub const fn apply(self, value: u32) -> u32 {
        saturate((value as u128 * self.0 as u128) / 100)
    }

    /// Returns `floor(value * self * other)` with a single rounding step,
    /// saturating at `u32::MAX`.
    #[inline]
    pub const fn apply_with(self, other: Multiplier, value: u32) -> u32 {
        saturate((value as u128 * self.0 as u128 * other.0 as u128) / 10_000)
    }
}

const fn saturate(value: u128) -> u32 {
    if value > u32::MAX as u128 {
        u32::MAX
    } else {
        value as u32
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac % 10 == 0 {
            write!(f, "{}.{}", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}
