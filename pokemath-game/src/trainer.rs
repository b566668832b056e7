//! Trainer snapshot and the per-request compositions built on it.
//!
//! The API layer loads a [`TrainerProgress`] from storage, calls one of the
//! functions here, and persists whatever it decides to keep. The snapshot
//! itself is never mutated.
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catch::{CatchReward, Rarity, attempt_catch, catch_probability};
use crate::experience::{calculate_level, get_exp_to_next_level, get_level_progress};
use crate::leaderboard::calculate_leaderboard_score;
use crate::reward::{
    Difficulty, StarDustRequest, calculate_daily_bonus, calculate_experience_reward,
    calculate_star_dust_reward,
};

/// Persisted trainer state needed by the economy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainerProgress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streak_days: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caught_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_tables: Vec<u32>,
}

/// Missing and `null` fields both read as a fresh trainer's value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Derived figures shown on the trainer profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerSummary {
    pub level: u32,
    pub exp_to_next_level: f64,
    pub level_progress: f64,
    pub leaderboard_score: i64,
    pub daily_bonus: u32,
}

impl TrainerProgress {
    #[must_use]
    pub fn level(&self) -> u32 {
        calculate_level(self.experience)
    }

    #[must_use]
    pub fn summary(&self) -> TrainerSummary {
        TrainerSummary {
            level: self.level(),
            exp_to_next_level: get_exp_to_next_level(self.experience),
            level_progress: get_level_progress(self.experience),
            leaderboard_score: calculate_leaderboard_score(
                self.experience,
                self.caught_count,
                &self.completed_tables,
            ),
            daily_bonus: calculate_daily_bonus(self.streak_days),
        }
    }
}

/// One answered problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub correct: bool,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub table_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub star_dust: u32,
    pub experience_gained: u32,
    pub new_experience: f64,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Rewards for an answered problem. Wrong answers earn nothing.
#[must_use]
pub fn submit_answer(progress: &TrainerProgress, submission: &AnswerSubmission) -> AnswerOutcome {
    let previous_level = progress.level();
    let (star_dust, experience_gained) = if submission.correct {
        let request = StarDustRequest {
            hints_used: submission.hints_used,
            streak: progress.streak_days,
            difficulty: submission.difficulty,
            table_number: submission.table_number,
        };
        (
            calculate_star_dust_reward(&request),
            calculate_experience_reward(submission.difficulty, submission.hints_used),
        )
    } else {
        (0, 0)
    };
    let new_experience = progress.experience.max(0.0) + f64::from(experience_gained);
    let new_level = calculate_level(new_experience);
    AnswerOutcome {
        star_dust,
        experience_gained,
        new_experience,
        new_level,
        leveled_up: new_level > previous_level,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatchOutcome {
    pub rarity: Rarity,
    pub probability: f64,
    pub caught: bool,
    pub reward: CatchReward,
}

/// Attempt to catch a Pokémon of the given rarity.
pub fn resolve_catch<R: Rng + ?Sized>(
    progress: &TrainerProgress,
    rarity: Rarity,
    rng: &mut R,
) -> CatchOutcome {
    let level = i32::try_from(progress.level()).unwrap_or(i32::MAX);
    let caught = attempt_catch(rarity, level, rng);
    CatchOutcome {
        rarity,
        probability: catch_probability(rarity, level),
        caught,
        reward: if caught {
            rarity.catch_reward()
        } else {
            CatchReward::default()
        },
    }
}
