//! Rarity tiers, capture odds and encounter rolls.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    CATCH_LEVEL_BONUS_CAP, CATCH_LEVEL_BONUS_PER_LEVEL, CATCH_PROBABILITY_CEILING,
};
use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::Legendary];

    /// Case-insensitive lookup. Unknown labels are treated as common.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "uncommon" => Self::Uncommon,
            "rare" => Self::Rare,
            "legendary" => Self::Legendary,
            _ => Self::Common,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
        }
    }

    /// Capture chance before any trainer-level bonus.
    #[must_use]
    pub const fn base_catch_rate(self) -> f64 {
        match self {
            Self::Common => 0.8,
            Self::Uncommon => 0.6,
            Self::Rare => 0.4,
            Self::Legendary => 0.2,
        }
    }

    #[must_use]
    pub const fn catch_reward(self) -> CatchReward {
        match self {
            Self::Common => CatchReward::new(10, 5),
            Self::Uncommon => CatchReward::new(20, 10),
            Self::Rare => CatchReward::new(50, 25),
            Self::Legendary => CatchReward::new(100, 50),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout for a successful catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatchReward {
    pub star_dust: u32,
    pub experience: u32,
}

impl CatchReward {
    #[must_use]
    pub const fn new(star_dust: u32, experience: u32) -> Self {
        Self {
            star_dust,
            experience,
        }
    }
}

/// Capture probability for a rarity label, always within `[0, 0.95]`.
#[must_use]
pub fn calculate_catch_probability(rarity: &str, trainer_level: i32) -> f64 {
    catch_probability(Rarity::from_label(rarity), trainer_level)
}

/// Typed variant of [`calculate_catch_probability`].
#[must_use]
pub fn catch_probability(rarity: Rarity, trainer_level: i32) -> f64 {
    let level = f64::from(trainer_level.max(0));
    let bonus = (level * CATCH_LEVEL_BONUS_PER_LEVEL).min(CATCH_LEVEL_BONUS_CAP);
    (rarity.base_catch_rate() + bonus).clamp(0.0, CATCH_PROBABILITY_CEILING)
}

/// Spawn weights (percent) for each rarity within one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub legendary: u32,
}

impl RarityWeights {
    const fn new(common: u32, uncommon: u32, rare: u32, legendary: u32) -> Self {
        Self {
            common,
            uncommon,
            rare,
            legendary,
        }
    }

    #[must_use]
    pub const fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        Rarity::ALL.iter().map(|rarity| self.weight(*rarity)).sum()
    }
}

/// Spawn weights for a table number; unknown tables use the table-2 weights.
#[must_use]
pub fn rarity_weights(table_number: u32) -> RarityWeights {
    match Region::from_number(table_number).unwrap_or(Region::Two) {
        Region::Two => RarityWeights::new(70, 25, 5, 0),
        Region::Three => RarityWeights::new(65, 27, 7, 1),
        Region::Four => RarityWeights::new(60, 28, 10, 2),
        Region::Five => RarityWeights::new(55, 30, 12, 3),
        Region::Six => RarityWeights::new(50, 30, 15, 5),
        Region::Seven => RarityWeights::new(45, 30, 18, 7),
        Region::Eight => RarityWeights::new(40, 30, 20, 10),
        Region::Nine => RarityWeights::new(35, 30, 22, 13),
    }
}

/// Pick the rarity of a wild encounter on the given table.
pub fn roll_rarity<R: Rng + ?Sized>(table_number: u32, rng: &mut R) -> Rarity {
    let weights = rarity_weights(table_number);
    let total = weights.total();
    if total == 0 {
        return Rarity::Common;
    }
    let mut roll = rng.gen_range(0..total);
    for rarity in Rarity::ALL {
        let weight = weights.weight(rarity);
        if roll < weight {
            return rarity;
        }
        roll -= weight;
    }
    Rarity::Common
}

/// Single capture attempt at the trainer's catch probability.
pub fn attempt_catch<R: Rng + ?Sized>(rarity: Rarity, trainer_level: i32, rng: &mut R) -> bool {
    rng.gen_bool(catch_probability(rarity, trainer_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn probability_examples() {
        assert!((calculate_catch_probability("legendary", 0) - 0.2).abs() < f64::EPSILON);
        assert!((calculate_catch_probability("common", 100) - 0.95).abs() < f64::EPSILON);
        assert!((calculate_catch_probability("uncommon", 20) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn lookup_is_case_insensitive_with_common_fallback() {
        assert_eq!(Rarity::from_label("LEGENDARY"), Rarity::Legendary);
        assert_eq!(Rarity::from_label(" Rare "), Rarity::Rare);
        assert_eq!(Rarity::from_label("mythical"), Rarity::Common);
        assert!((calculate_catch_probability("mythical", 0) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn probability_stays_in_bounds() {
        for label in ["common", "uncommon", "rare", "legendary", "", "???"] {
            for level in [-100, -1, 0, 1, 15, 30, 31, 500, i32::MAX, i32::MIN] {
                let p = calculate_catch_probability(label, level);
                assert!((0.0..=0.95).contains(&p), "{label} at {level} gave {p}");
            }
        }
    }

    #[test]
    fn negative_levels_grant_no_bonus_and_bonus_caps() {
        assert!((catch_probability(Rarity::Rare, -10) - 0.4).abs() < f64::EPSILON);
        assert!((catch_probability(Rarity::Rare, 30) - 0.7).abs() < 1e-9);
        assert!((catch_probability(Rarity::Rare, 90) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        for table in 2..=9 {
            assert_eq!(rarity_weights(table).total(), 100, "table {table}");
        }
        assert_eq!(rarity_weights(42), rarity_weights(2));
    }

    #[test]
    fn zero_weight_rarity_is_never_rolled() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..2_000 {
            assert_ne!(roll_rarity(2, &mut rng), Rarity::Legendary);
        }
    }

    #[test]
    fn higher_tables_roll_legendaries() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let legendaries = (0..2_000)
            .filter(|_| roll_rarity(9, &mut rng) == Rarity::Legendary)
            .count();
        assert!(legendaries > 150, "got {legendaries}");
    }

    #[test]
    fn catch_attempts_follow_probability() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let caught = (0..4_000)
            .filter(|_| attempt_catch(Rarity::Legendary, 0, &mut rng))
            .count();
        assert!((600..=1_000).contains(&caught), "got {caught}");
    }

    #[test]
    fn rewards_grow_with_rarity() {
        let dust: Vec<u32> = Rarity::ALL.iter().map(|r| r.catch_reward().star_dust).collect();
        assert!(dust.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
