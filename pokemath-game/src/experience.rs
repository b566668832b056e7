//! Experience curve: accumulated experience to trainer level.
//!
//! Level `n` starts at `100 * (n - 1)^2` experience, so every band is wider
//! than the previous one. All functions are total: NaN and negative
//! experience behave like a fresh trainer.

use crate::constants::LEVEL_EXPERIENCE_BASE;
use crate::numbers::{floor_f64_to_u32, non_negative};

/// Trainer level for an experience total. Never less than 1.
#[must_use]
pub fn calculate_level(experience: f64) -> u32 {
    let experience = non_negative(experience);
    floor_f64_to_u32((experience / LEVEL_EXPERIENCE_BASE).sqrt()).saturating_add(1)
}

/// Experience at which `level` begins. Level 0 is treated as level 1.
#[must_use]
pub fn required_experience_for_level(level: u32) -> f64 {
    let steps = f64::from(level.max(1) - 1);
    LEVEL_EXPERIENCE_BASE * steps * steps
}

/// Experience still missing before the next level; never negative.
#[must_use]
pub fn get_exp_to_next_level(experience: f64) -> f64 {
    let experience = non_negative(experience);
    let level = calculate_level(experience);
    let next = required_experience_for_level(level.saturating_add(1));
    (next - experience).max(0.0)
}

/// Percentage of the current level band already earned, in `[0, 100]`.
#[must_use]
pub fn get_level_progress(experience: f64) -> f64 {
    let experience = non_negative(experience);
    let level = calculate_level(experience);
    let band_start = required_experience_for_level(level);
    let band_end = required_experience_for_level(level.saturating_add(1));
    let width = band_end - band_start;
    if width <= 0.0 || !width.is_finite() {
        return 100.0;
    }
    ((experience - band_start) / width * 100.0).clamp(0.0, 100.0)
}
