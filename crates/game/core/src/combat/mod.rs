//! Combat resolution system.
//!
//! Pure functions for the per-beat combat rules. Nothing in this module
//! mutates state; the engine applies the numbers these functions produce.
//!
//! - `effectiveness`: element matchup multiplier
//! - `resolve_target`: lane targeting with right-before-left fallback
//! - `strike_damage` / `resolve_clash`: integer damage math and clash outcomes

pub mod damage;
pub mod effectiveness;
pub mod targeting;

pub use damage::{ClashOutcome, resolve_clash, skill_damage, skill_heal, strike_damage};
pub use effectiveness::effectiveness;
pub use targeting::resolve_target;
