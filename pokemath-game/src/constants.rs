//! Centralized balance and tuning constants for the game economy.
//!
//! These values define the deterministic math behind levels, rewards and
//! catches. Keeping them together ensures that the economy can only be
//! adjusted via code changes reviewed in version control.

// Configuration keys -------------------------------------------------------
pub(crate) const STAGE_LAYOUT_ENV_VAR: &str = "POKEMATH_STAGE_LAYOUT";
pub(crate) const DEBUG_ENV_VAR: &str = "POKEMATH_DEBUG_LOGS";

// Experience curve ---------------------------------------------------------
pub(crate) const LEVEL_EXPERIENCE_BASE: f64 = 100.0;

// Star dust rewards --------------------------------------------------------
pub(crate) const STAR_DUST_NO_HINT_BASE: f64 = 15.0;
pub(crate) const STAR_DUST_STANDARD_BASE: f64 = 10.0;

/// Streak thresholds (ascending) and the multiplier each unlocks.
pub(crate) const STREAK_MULTIPLIER_TIERS: [(u32, f64); 4] =
    [(3, 1.1), (7, 1.2), (14, 1.3), (30, 1.5)];

/// Daily login tiers: (threshold days, base star dust, streak multiplier).
pub(crate) const DAILY_BONUS_TIERS: [(u32, u32, f64); 5] = [
    (1, 10, 1.0),
    (3, 15, 1.2),
    (7, 20, 1.5),
    (14, 30, 2.0),
    (30, 50, 3.0),
];

// Experience rewards -------------------------------------------------------
pub(crate) const EXPERIENCE_EASY: u32 = 10;
pub(crate) const EXPERIENCE_NORMAL: u32 = 15;
pub(crate) const EXPERIENCE_HARD: u32 = 20;

// Catch tuning -------------------------------------------------------------
pub(crate) const CATCH_LEVEL_BONUS_PER_LEVEL: f64 = 0.01;
pub(crate) const CATCH_LEVEL_BONUS_CAP: f64 = 0.30;
pub(crate) const CATCH_PROBABILITY_CEILING: f64 = 0.95;

// Leaderboard --------------------------------------------------------------
pub(crate) const LEADERBOARD_EXPERIENCE_WEIGHT: f64 = 1.0;
pub(crate) const LEADERBOARD_POINTS_PER_CATCH: f64 = 10.0;
pub(crate) const LEADERBOARD_POINTS_PER_TABLE: f64 = 100.0;

// Stage migration ----------------------------------------------------------
pub(crate) const MINUTES_PER_STAGE: u32 = 8;
pub(crate) const REDUCED_STAGE_COUNT: u32 = 3;
pub(crate) const DEFAULT_STAGE_COUNT: u32 = 5;
