//! Random unit generation.

use rand::Rng;
use strum::IntoEnumIterator;
use symphony_core::{Element, MatchConfig, Rarity, Unit, UnitError, UnitId, UnitStats};

/// Source of fresh units for rosters and enemy formations.
pub trait UnitFactory {
    /// Generates a unit of the given tier, or of a rolled tier if `None`.
    fn generate(&mut self, rarity: Option<Rarity>) -> Result<Unit, UnitError>;
}

/// Instrument names available to each element.
pub const fn instrument_names(element: Element) -> &'static [&'static str; 4] {
    match element {
        Element::Brass => &["Trumpet", "Trombone", "Tuba", "Horn"],
        Element::Woodwind => &["Flute", "Clarinet", "Oboe", "Bassoon"],
        Element::Strings => &["Violin", "Viola", "Cello", "Harp"],
        Element::Percussion => &["Timpani", "Snare", "Cymbals", "Marimba"],
        Element::Electronic => &["Synthesizer", "Electric Guitar", "Bass", "Launchpad"],
        Element::Vocal => &["Soprano", "Tenor", "Baritone", "Alto"],
    }
}

/// Unit factory driven by an injected random number generator.
///
/// Base attack is drawn from `[10, 20)` and base hp from `[100, 150)`, both
/// scaled by the rarity multiplier. Action intervals fall in `2..=4` beats and
/// ids are handed out sequentially.
pub struct RandomUnitFactory<R: Rng> {
    rng: R,
    next_id: u32,
}

impl<R: Rng> RandomUnitFactory<R> {
    const ATK_RANGE: std::ops::Range<u32> = 10..20;
    const HP_RANGE: std::ops::Range<u32> = 100..150;
    const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 2..=4;

    pub fn new(rng: R) -> Self {
        Self { rng, next_id: 1 }
    }

    /// Starts id allocation at `first_id` (builder pattern).
    #[must_use]
    pub fn with_first_id(mut self, first_id: u32) -> Self {
        self.next_id = first_id;
        self
    }

    /// Rolls a tier against the per-mille weight table.
    pub fn roll_rarity(&mut self) -> Rarity {
        let roll = self.rng.gen_range(0..Rarity::WEIGHT_TOTAL);
        let mut cumulative = 0;
        for rarity in Rarity::iter() {
            cumulative += rarity.roll_weight();
            if roll < cumulative {
                return rarity;
            }
        }
        Rarity::Normal
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl<R: Rng> UnitFactory for RandomUnitFactory<R> {
    fn generate(&mut self, rarity: Option<Rarity>) -> Result<Unit, UnitError> {
        let rarity = match rarity {
            Some(rarity) => rarity,
            None => self.roll_rarity(),
        };

        let elements: Vec<Element> = Element::iter().collect();
        let element = elements[self.rng.gen_range(0..elements.len())];
        let names = instrument_names(element);
        let name = names[self.rng.gen_range(0..names.len())];

        let multiplier = rarity.stat_multiplier();
        let atk = multiplier.apply(self.rng.gen_range(Self::ATK_RANGE));
        let max_hp = multiplier.apply(self.rng.gen_range(Self::HP_RANGE));
        let interval = self.rng.gen_range(Self::INTERVAL_RANGE);
        let stats = UnitStats::new(atk, max_hp, interval)
            .with_max_cooldown(MatchConfig::DEFAULT_MAX_COOLDOWN);

        let id = self.allocate_id();
        Ok(Unit::new(id, name, element, stats)?.with_rarity(rarity))
    }
}
