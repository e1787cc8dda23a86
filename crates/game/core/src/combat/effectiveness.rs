//! Element matchup table.

use crate::state::{Element, Multiplier};

/// Damage multiplier for `attacker` hitting `defender`.
///
/// Rules apply in priority order: the attacker's strong matchup (x1.5), its
/// weak matchup (x0.5), the Electronic/Vocal pair (x2.0), neutral otherwise.
/// Electronic and Vocal are each other's strong matchup, so the first rule
/// already claims that pair.
pub fn effectiveness(attacker: Element, defender: Element) -> Multiplier {
    if attacker.strong_against() == defender {
        Multiplier::STRONG
    } else if attacker.weak_to() == defender {
        Multiplier::HALF
    } else if attacker.is_mutual_pair(defender) {
        Multiplier::DOUBLE
    } else {
        Multiplier::NEUTRAL
    }
}
