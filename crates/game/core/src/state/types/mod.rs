pub mod common;
pub mod element;
pub mod formation;
pub mod unit;

pub use common::{Beat, Multiplier, Timestamp};
pub use element::{Element, Rarity};
pub use formation::{Formation, Lane, LaneError, Side};
pub use unit::{Unit, UnitError, UnitId, UnitSpec, UnitStats};
