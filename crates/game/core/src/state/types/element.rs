//! Instrument sections and rarity tiers.
//!
//! Both are closed enumerations with associated lookup data. The tables are
//! fixed for the lifetime of a match.

use super::common::Multiplier;

/// Instrument section of a unit; drives element effectiveness.
///
/// The four orchestral sections form a single strong/weak chain
/// (Brass > Woodwind > Strings > Percussion > Brass). Electronic and Vocal
/// form a pair that counters each other.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Element {
    Brass,
    Woodwind,
    Strings,
    Percussion,
    Electronic,
    Vocal,
}

impl Element {
    /// The element this one deals bonus damage to.
    pub const fn strong_against(self) -> Element {
        match self {
            Element::Brass => Element::Woodwind,
            Element::Woodwind => Element::Strings,
            Element::Strings => Element::Percussion,
            Element::Percussion => Element::Brass,
            Element::Electronic => Element::Vocal,
            Element::Vocal => Element::Electronic,
        }
    }

    /// The element this one deals reduced damage to.
    pub const fn weak_to(self) -> Element {
        match self {
            Element::Brass => Element::Percussion,
            Element::Woodwind => Element::Brass,
            Element::Strings => Element::Woodwind,
            Element::Percussion => Element::Strings,
            Element::Electronic => Element::Vocal,
            Element::Vocal => Element::Electronic,
        }
    }

    /// Returns true for the Electronic/Vocal pair in either direction.
    pub const fn is_mutual_pair(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Electronic, Element::Vocal) | (Element::Vocal, Element::Electronic)
        )
    }
}

/// Generation-time rarity tier.
///
/// Rarity scales stats when a unit is generated and has no effect on
/// combat resolution itself.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Normal,
    Rare,
    SuperRare,
    UltraRare,
    HyperRare,
    Secret,
}

impl Rarity {
    /// Total of all roll weights.
    pub const WEIGHT_TOTAL: u32 = 1000;

    /// Stat multiplier applied to base attack and hit points.
    pub const fn stat_multiplier(self) -> Multiplier {
        match self {
            Rarity::Normal => Multiplier::from_hundredths(100),
            Rarity::Rare => Multiplier::from_hundredths(120),
            Rarity::SuperRare => Multiplier::from_hundredths(150),
            Rarity::UltraRare => Multiplier::from_hundredths(200),
            Rarity::HyperRare => Multiplier::from_hundredths(300),
            Rarity::Secret => Multiplier::from_hundredths(500),
        }
    }

    /// Roll weight out of [`Rarity::WEIGHT_TOTAL`].
    pub const fn roll_weight(self) -> u32 {
        match self {
            Rarity::Normal => 500,
            Rarity::Rare => 300,
            Rarity::SuperRare => 150,
            Rarity::UltraRare => 40,
            Rarity::HyperRare => 9,
            Rarity::Secret => 1,
        }
    }
}
