//! Star dust and experience rewards for solved problems and daily streaks.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    DAILY_BONUS_TIERS, EXPERIENCE_EASY, EXPERIENCE_HARD, EXPERIENCE_NORMAL,
    STAR_DUST_NO_HINT_BASE, STAR_DUST_STANDARD_BASE, STREAK_MULTIPLIER_TIERS,
};
use crate::numbers::floor_f64_to_u32;
use crate::region::table_bonus;

/// Problem difficulty chosen for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    #[serde(alias = "medium")]
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn tier(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Hard => 3,
        }
    }

    #[must_use]
    pub const fn star_dust_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Normal => 1.2,
            Self::Hard => 1.5,
        }
    }

    #[must_use]
    pub const fn base_experience(self) -> u32 {
        match self {
            Self::Easy => EXPERIENCE_EASY,
            Self::Normal => EXPERIENCE_NORMAL,
            Self::Hard => EXPERIENCE_HARD,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, normal, hard or 1-3)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "normal" | "medium" | "2" => Ok(Self::Normal),
            "hard" | "3" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Last entry of an ascending threshold table whose threshold is `<= value`.
///
/// Ties resolve to the later entry, so a table listing the same threshold
/// twice yields the second one.
pub(crate) fn last_qualifying<T>(
    tiers: &[T],
    value: u32,
    threshold: impl Fn(&T) -> u32,
) -> Option<&T> {
    tiers.iter().rfind(|tier| threshold(*tier) <= value)
}

/// Multiplier unlocked by a streak, if any tier qualifies.
#[must_use]
pub fn streak_multiplier(streak: u32) -> Option<f64> {
    last_qualifying(&STREAK_MULTIPLIER_TIERS, streak, |tier| tier.0).map(|tier| tier.1)
}

/// Inputs for a single solved problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StarDustRequest {
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub table_number: u32,
}

/// Star dust earned for a solved problem.
///
/// The base comes from hint usage alone; see DESIGN.md for why callers can
/// no longer pass their own base amount.
#[must_use]
pub fn calculate_star_dust_reward(request: &StarDustRequest) -> u32 {
    let mut reward = if request.hints_used == 0 {
        STAR_DUST_NO_HINT_BASE
    } else {
        STAR_DUST_STANDARD_BASE
    };
    reward *= request.difficulty.star_dust_multiplier();
    reward += f64::from(table_bonus(request.table_number));
    if let Some(multiplier) = streak_multiplier(request.streak) {
        reward *= multiplier;
    }
    floor_f64_to_u32(reward)
}

/// Daily login bonus for the current streak length.
#[must_use]
pub fn calculate_daily_bonus(streak_days: u32) -> u32 {
    match last_qualifying(&DAILY_BONUS_TIERS, streak_days, |tier| tier.0) {
        Some(&(_, base, multiplier)) => floor_f64_to_u32(f64::from(base) * multiplier),
        None => DAILY_BONUS_TIERS[0].1,
    }
}

/// Experience earned for a solved problem; hints halve it, never below 1.
#[must_use]
pub fn calculate_experience_reward(difficulty: Difficulty, hints_used: u32) -> u32 {
    let base = difficulty.base_experience();
    if hints_used == 0 {
        base
    } else {
        (base / 2).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hints_used: u32, streak: u32, difficulty: Difficulty, table: u32) -> StarDustRequest {
        StarDustRequest {
            hints_used,
            streak,
            difficulty,
            table_number: table,
        }
    }

    #[test]
    fn baseline_reward_without_hints() {
        assert_eq!(calculate_star_dust_reward(&request(0, 0, Difficulty::Easy, 2)), 15);
    }

    #[test]
    fn reward_applies_difficulty_bonus_and_streak() {
        assert_eq!(calculate_star_dust_reward(&request(1, 7, Difficulty::Hard, 9)), 30);
        assert_eq!(calculate_star_dust_reward(&request(0, 30, Difficulty::Normal, 5)), 33);
        assert_eq!(calculate_star_dust_reward(&request(0, 14, Difficulty::Hard, 8)), 39);
        assert_eq!(calculate_star_dust_reward(&request(0, 7, Difficulty::Hard, 7)), 34);
    }

    #[test]
    fn reward_floors_fractional_results() {
        assert_eq!(calculate_star_dust_reward(&request(0, 3, Difficulty::Easy, 2)), 16);
        assert_eq!(calculate_star_dust_reward(&request(3, 6, Difficulty::Normal, 3)), 15);
    }

    #[test]
    fn streak_below_first_threshold_has_no_multiplier() {
        assert_eq!(streak_multiplier(0), None);
        assert_eq!(streak_multiplier(2), None);
        assert_eq!(calculate_star_dust_reward(&request(2, 2, Difficulty::Hard, 4)), 18);
    }

    #[test]
    fn highest_qualifying_streak_tier_wins() {
        assert_eq!(streak_multiplier(3), Some(1.1));
        assert_eq!(streak_multiplier(13), Some(1.2));
        assert_eq!(streak_multiplier(29), Some(1.3));
        assert_eq!(streak_multiplier(400), Some(1.5));
    }

    #[test]
    fn ties_prefer_later_tier() {
        let tiers = [(3_u32, 'a'), (3, 'b'), (5, 'c')];
        assert_eq!(last_qualifying(&tiers, 4, |t| t.0), Some(&(3, 'b')));
        assert_eq!(last_qualifying(&tiers, 2, |t| t.0), None);
    }

    #[test]
    fn unknown_table_contributes_no_bonus() {
        assert_eq!(calculate_star_dust_reward(&request(0, 100, Difficulty::Normal, 12)), 27);
    }

    #[test]
    fn daily_bonus_tiers() {
        assert_eq!(calculate_daily_bonus(0), 10);
        assert_eq!(calculate_daily_bonus(1), 10);
        assert_eq!(calculate_daily_bonus(2), 10);
        assert_eq!(calculate_daily_bonus(3), 18);
        assert_eq!(calculate_daily_bonus(7), 30);
        assert_eq!(calculate_daily_bonus(14), 60);
        assert_eq!(calculate_daily_bonus(29), 60);
        assert_eq!(calculate_daily_bonus(30), 150);
        assert_eq!(calculate_daily_bonus(365), 150);
    }

    #[test]
    fn experience_reward_halves_with_hints() {
        assert_eq!(calculate_experience_reward(Difficulty::Easy, 0), 10);
        assert_eq!(calculate_experience_reward(Difficulty::Normal, 0), 15);
        assert_eq!(calculate_experience_reward(Difficulty::Hard, 2), 10);
        assert_eq!(calculate_experience_reward(Difficulty::Normal, 1), 7);
    }

    #[test]
    fn difficulty_parses_labels_and_tiers() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!("3".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.tier(), 3);
    }
}
