//! Lane targeting.

use crate::state::{Formation, Lane};

/// Picks the opposing lane a unit in `source` strikes.
///
/// The mirrored lane wins if its unit is alive. Otherwise lanes are probed
/// outward by increasing distance, right before left, and the first living
/// unit is chosen. Returns `None` only when the formation has no living unit.
pub fn resolve_target(source: Lane, opposing: &Formation) -> Option<Lane> {
    if opposing.living(source).is_some() {
        return Some(source);
    }

    (1..Formation::LANES).find_map(|offset| {
        [source.right(offset), source.left(offset)]
            .into_iter()
            .flatten()
            .find(|&lane| opposing.living(lane).is_some())
    })
}
