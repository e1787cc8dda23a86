//! Five-lane formations.

use std::fmt;

use super::unit::Unit;
use crate::config::MatchConfig;
use crate::error::{ErrorSeverity, GameError};

/// Fixed lane index (0..=4); the stable identity used for targeting and skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane(u8);

/// Lane index outside the formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("lane {index} is outside the formation (0..{lanes})", lanes = MatchConfig::LANES)]
pub struct LaneError {
    pub index: usize,
}

impl GameError for LaneError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "LANE_OUT_OF_RANGE"
    }
}

impl Lane {
    /// Middle lane of the formation.
    pub const CENTER: Lane = Lane((MatchConfig::LANES / 2) as u8);

    pub fn new(index: usize) -> Result<Self, LaneError> {
        if index < MatchConfig::LANES {
            Ok(Self(index as u8))
        } else {
            Err(LaneError { index })
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All lanes in ascending order.
    pub fn all() -> impl Iterator<Item = Lane> {
        (0..MatchConfig::LANES as u8).map(Lane)
    }

    /// Lane `offset` steps to the right, if inside the formation.
    pub fn right(self, offset: usize) -> Option<Lane> {
        Lane::new(self.index() + offset).ok()
    }

    /// Lane `offset` steps to the left, if inside the formation.
    pub fn left(self, offset: usize) -> Option<Lane> {
        self.index().checked_sub(offset).map(|i| Lane(i as u8))
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane {}", self.0)
    }
}

/// The two opposing formations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Ordered sequence of exactly five lane slots.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formation {
    lanes: [Option<Unit>; MatchConfig::LANES],
}

impl Formation {
    pub const LANES: usize = MatchConfig::LANES;

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_lanes(lanes: [Option<Unit>; MatchConfig::LANES]) -> Self {
        Self { lanes }
    }

    /// Builds a combat formation from roster templates.
    ///
    /// Each template is copied through [`Unit::deploy`]; extra entries beyond
    /// the fifth are ignored.
    pub fn deploy<'a>(templates: impl IntoIterator<Item = Option<&'a Unit>>) -> Self {
        let mut formation = Self::empty();
        for (slot, template) in formation.lanes.iter_mut().zip(templates) {
            *slot = template.map(Unit::deploy);
        }
        formation
    }

    /// Places a unit in a lane (builder pattern).
    #[must_use]
    pub fn with_unit(mut self, lane: Lane, unit: Unit) -> Self {
        self.lanes[lane.index()] = Some(unit);
        self
    }

    pub fn get(&self, lane: Lane) -> Option<&Unit> {
        self.lanes[lane.index()].as_ref()
    }

    pub fn get_mut(&mut self, lane: Lane) -> Option<&mut Unit> {
        self.lanes[lane.index()].as_mut()
    }

    /// Returns the unit in `lane` only if it is alive.
    pub fn living(&self, lane: Lane) -> Option<&Unit> {
        self.get(lane).filter(|unit| unit.is_alive())
    }

    pub fn has_living(&self) -> bool {
        self.lanes.iter().flatten().any(Unit::is_alive)
    }

    pub fn living_count(&self) -> usize {
        self.lanes.iter().flatten().filter(|u| u.is_alive()).count()
    }

    /// Iterates over every slot, empty ones included.
    pub fn slots(&self) -> impl Iterator<Item = (Lane, Option<&Unit>)> {
        Lane::all().zip(self.lanes.iter().map(Option::as_ref))
    }

    /// Iterates over occupied lanes.
    pub fn units(&self) -> impl Iterator<Item = (Lane, &Unit)> {
        Lane::all()
            .zip(self.lanes.iter())
            .filter_map(|(lane, slot)| slot.as_ref().map(|unit| (lane, unit)))
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = (Lane, &mut Unit)> {
        Lane::all()
            .zip(self.lanes.iter_mut())
            .filter_map(|(lane, slot)| slot.as_mut().map(|unit| (lane, unit)))
    }
}
