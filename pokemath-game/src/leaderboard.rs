//! Leaderboard ranking score.
use crate::constants::{
    LEADERBOARD_EXPERIENCE_WEIGHT, LEADERBOARD_POINTS_PER_CATCH, LEADERBOARD_POINTS_PER_TABLE,
};
use crate::numbers::{floor_f64_to_i64, usize_to_f64};

/// Combine experience, catches and completed tables into one score.
///
/// Inputs are not validated; callers pass non-negative values.
#[must_use]
pub fn calculate_leaderboard_score(
    experience: f64,
    caught_count: u32,
    completed_tables: &[u32],
) -> i64 {
    let score = experience * LEADERBOARD_EXPERIENCE_WEIGHT
        + f64::from(caught_count) * LEADERBOARD_POINTS_PER_CATCH
        + usize_to_f64(completed_tables.len()) * LEADERBOARD_POINTS_PER_TABLE;
    floor_f64_to_i64(score)
}
