//! Pokémon Math Adventure game economy
//!
//! Platform-agnostic economy rules for the multiplication adventure: the
//! experience curve, star dust and experience rewards, catch odds, the
//! stage-reduction migration table and leaderboard scoring. Every function
//! is pure; persistence and transport belong to the caller.

pub mod achievements;
pub mod catch;
pub mod config;
pub mod constants;
pub mod experience;
pub mod leaderboard;
pub mod numbers;
pub mod region;
pub mod reward;
pub mod stage_migration;
pub mod streak;
pub mod trainer;

// Re-export commonly used types
pub use achievements::{Achievement, evaluate_achievements};
pub use catch::{
    CatchReward, Rarity, RarityWeights, attempt_catch, calculate_catch_probability,
    catch_probability, rarity_weights, roll_rarity,
};
pub use config::{FeatureFlags, FlagsError, StageLayout, StageLayoutPhase};
pub use experience::{
    calculate_level, get_exp_to_next_level, get_level_progress, required_experience_for_level,
};
pub use leaderboard::calculate_leaderboard_score;
pub use region::{Region, table_bonus};
pub use reward::{
    Difficulty, ParseDifficultyError, StarDustRequest, calculate_daily_bonus,
    calculate_experience_reward, calculate_star_dust_reward, streak_multiplier,
};
pub use stage_migration::{
    MigrationOutcome, MigrationStats, STAGE_REDUCTIONS, StageMigrationConfig, StageTableError,
    TimeReduction, calculate_time_reduction, get_legacy_stage_count, get_migration_stats,
    get_new_stage_count, is_region_affected, map_old_stage_to_new, migrate_user_progress,
    reduction_for, validate_reduction_table,
};
pub use streak::calculate_streak;
pub use trainer::{
    AnswerOutcome, AnswerSubmission, CatchOutcome, TrainerProgress, TrainerSummary,
    resolve_catch, submit_answer,
};
