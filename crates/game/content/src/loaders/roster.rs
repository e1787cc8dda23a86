//! Player roster loader.
//!
//! RON format:
//!
//! ```text
//! (
//!     units: [
//!         (name: "Trumpet", element: BRASS, rarity: RARE, atk: 24, max_hp: 144, interval: 2),
//!         (name: "Cello", element: STRINGS, atk: 15, max_hp: 120, interval: 3),
//!     ],
//!     formation: Some([Some(0), None, Some(1), None, None]),
//! )
//! ```
//!
//! `formation` maps each lane to an index into `units`. When omitted, the
//! first five units fill lanes 0..=4 in order.

use std::path::Path;

use symphony_core::{Formation, MatchConfig, Unit, UnitId, UnitSpec};

use crate::loaders::{LoadResult, read_file};

/// Roster file contents before validation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterSpec {
    pub units: Vec<UnitSpec>,
    #[serde(default)]
    pub formation: Option<Vec<Option<usize>>>,
}

/// Validated roster: unit templates plus the lane assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    pub units: Vec<Unit>,
    pub formation: [Option<usize>; MatchConfig::LANES],
}

impl Roster {
    /// Validates a spec. Units receive sequential ids starting at 1.
    pub fn from_spec(spec: RosterSpec) -> LoadResult<Self> {
        let units = spec
            .units
            .into_iter()
            .zip(1..)
            .map(|(unit, id)| unit.into_unit(UnitId(id)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid roster unit: {}", e))?;

        let mut formation = [None; MatchConfig::LANES];
        match spec.formation {
            Some(lanes) => {
                if lanes.len() > MatchConfig::LANES {
                    anyhow::bail!(
                        "Roster formation has {} lanes (max {})",
                        lanes.len(),
                        MatchConfig::LANES
                    );
                }
                for (lane, slot) in lanes.into_iter().enumerate() {
                    if let Some(index) = slot {
                        if index >= units.len() {
                            anyhow::bail!(
                                "Lane {} references unit {} but the roster has {} units",
                                lane,
                                index,
                                units.len()
                            );
                        }
                        if formation.contains(&Some(index)) {
                            anyhow::bail!("Unit {} is assigned to more than one lane", index);
                        }
                    }
                    formation[lane] = slot;
                }
            }
            None => {
                for (lane, slot) in formation.iter_mut().enumerate().take(units.len()) {
                    *slot = Some(lane);
                }
            }
        }

        Ok(Self { units, formation })
    }

    /// Fresh combat formation built from the assigned templates.
    pub fn deploy(&self) -> Formation {
        Formation::deploy(
            self.formation
                .iter()
                .map(|slot| slot.and_then(|index| self.units.get(index))),
        )
    }
}

/// Loader for player rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Roster::from_spec(spec)
    }
}
