use anyhow::{Context, Result};
use chrono::NaiveDate;
use pokemath_game::{
    Difficulty, FeatureFlags, Rarity, STAGE_REDUCTIONS, StageLayout, StarDustRequest,
    TrainerProgress, attempt_catch, calculate_catch_probability, calculate_daily_bonus,
    calculate_experience_reward, calculate_leaderboard_score, calculate_level,
    calculate_star_dust_reward, calculate_streak, calculate_time_reduction,
    evaluate_achievements, get_exp_to_next_level, get_level_progress, get_migration_stats,
    get_new_stage_count, is_region_affected, migrate_user_progress, rarity_weights, roll_rarity,
    streak_multiplier, validate_reduction_table,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde_json::json;
use std::path::Path;

use crate::reports::Report;

pub fn level_report(experience: f64) -> Report {
    let level = calculate_level(experience);
    let exp_to_next = get_exp_to_next_level(experience);
    let progress = get_level_progress(experience);
    Report::new(
        "Trainer Level",
        json!({
            "experience": experience,
            "level": level,
            "exp_to_next_level": exp_to_next,
            "level_progress": progress,
        }),
    )
    .row("Experience", experience)
    .row("Level", level)
    .row("To next level", exp_to_next)
    .row("Band progress", format!("{progress:.1}%"))
}

pub fn reward_report(request: &StarDustRequest) -> Report {
    let star_dust = calculate_star_dust_reward(request);
    let experience = calculate_experience_reward(request.difficulty, request.hints_used);
    let multiplier = streak_multiplier(request.streak);
    Report::new(
        "Problem Reward",
        json!({
            "request": request,
            "star_dust": star_dust,
            "experience": experience,
            "streak_multiplier": multiplier,
        }),
    )
    .row("Difficulty", request.difficulty)
    .row("Table", request.table_number)
    .row("Hints used", request.hints_used)
    .row(
        "Streak multiplier",
        multiplier.map_or_else(|| "none".to_string(), |m| format!("×{m}")),
    )
    .row("Star dust", star_dust)
    .row("Experience", experience)
}

pub fn daily_bonus_report(streak: u32) -> Report {
    let bonus = calculate_daily_bonus(streak);
    Report::new(
        "Daily Bonus",
        json!({ "streak_days": streak, "daily_bonus": bonus }),
    )
    .row("Streak days", streak)
    .row("Star dust", bonus)
}

pub fn catch_report(rarity_label: &str, level: i32, attempts: u32, seed: u64) -> Report {
    let rarity = Rarity::from_label(rarity_label);
    let probability = calculate_catch_probability(rarity_label, level);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let caught = (0..attempts)
        .filter(|_| attempt_catch(rarity, level, &mut rng))
        .count();
    let reward = rarity.catch_reward();
    let mut report = Report::new(
        "Catch Probability",
        json!({
            "rarity": rarity,
            "trainer_level": level,
            "probability": probability,
            "reward": reward,
            "attempts": attempts,
            "caught": caught,
        }),
    )
    .row("Rarity", rarity)
    .row("Trainer level", level)
    .row("Probability", format!("{:.1}%", probability * 100.0))
    .row("Reward", format!("{} dust, {} exp", reward.star_dust, reward.experience));
    if attempts > 0 {
        report = report.row("Simulated", format!("{caught}/{attempts} caught (seed {seed})"));
    }
    if rarity.as_str() != rarity_label.trim().to_ascii_lowercase() {
        report = report.note(format!("unknown rarity `{rarity_label}` treated as common"));
    }
    report
}

pub fn encounter_report(table_number: u32, count: u32, seed: u64) -> Report {
    let weights = rarity_weights(table_number);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut tally = [0_u32; 4];
    for _ in 0..count {
        let rolled = roll_rarity(table_number, &mut rng);
        if let Some(slot) = Rarity::ALL.iter().position(|r| *r == rolled) {
            tally[slot] += 1;
        }
    }
    let mut report = Report::new(
        "Encounter Rarity",
        json!({
            "table_number": table_number,
            "weights": weights,
            "rolls": count,
            "tally": Rarity::ALL
                .iter()
                .zip(tally)
                .map(|(rarity, hits)| (rarity.as_str(), hits))
                .collect::<std::collections::BTreeMap<_, _>>(),
        }),
    )
    .row("Table", table_number);
    for (rarity, hits) in Rarity::ALL.iter().zip(tally) {
        report = report.row(
            rarity.as_str(),
            format!("{hits} rolls (weight {}%)", weights.weight(*rarity)),
        );
    }
    report
}

pub fn migrate_report(regions: &[u32]) -> Report {
    let outcome = migrate_user_progress(regions);
    let mut report = Report::new("Progress Migration", json!(&outcome))
        .row("Regions", regions.len())
        .row(
            "Remapped",
            regions.iter().filter(|id| is_region_affected(**id)).count(),
        );
    for line in &outcome.migration_log {
        report = report.note(line.clone());
    }
    report
}

pub fn migration_stats_report() -> Report {
    let stats = get_migration_stats();
    let per_region: Vec<_> = STAGE_REDUCTIONS
        .iter()
        .map(|config| {
            json!({
                "region_id": config.region_id,
                "time": calculate_time_reduction(config.region_id),
            })
        })
        .collect();
    let mut report = Report::new(
        "Stage Reduction Stats",
        json!({ "stats": stats, "regions": per_region }),
    )
    .row("Affected regions", stats.total_affected_regions)
    .row("Stages removed", stats.total_stage_reduction)
    .row("Average reduction", format!("{}%", stats.avg_reduction_percentage));
    for config in &STAGE_REDUCTIONS {
        let time = calculate_time_reduction(config.region_id);
        report = report.row(
            format!("Region {}", config.region_id),
            format!(
                "{} → {} stages, {} → {} min (-{}%)",
                config.old_stage_count,
                config.new_stage_count,
                time.original_time,
                time.reduced_time,
                time.reduction_percentage
            ),
        );
    }
    report
}

pub fn stage_report(flags: &FeatureFlags, region_id: u32, stage: u32) -> Report {
    let layout = StageLayout::new(flags);
    let resolved = layout.resolve_stage(region_id, stage);
    let stage_count = layout.stage_count(region_id);
    Report::new(
        "Stage Lookup",
        json!({
            "region_id": region_id,
            "stored_stage": stage,
            "resolved_stage": resolved,
            "stage_count": stage_count,
            "phase": layout.phase(),
            "affected": is_region_affected(region_id),
            "reduced_stage_count": get_new_stage_count(region_id),
        }),
    )
    .row("Region", region_id)
    .row("Layout", format!("{:?}", layout.phase()))
    .row("Stored stage", stage)
    .row("Resolved stage", format!("{resolved} of {stage_count}"))
}

pub fn leaderboard_report(experience: f64, caught: u32, tables: &[u32]) -> Report {
    let score = calculate_leaderboard_score(experience, caught, tables);
    Report::new(
        "Leaderboard Score",
        json!({
            "experience": experience,
            "caught_count": caught,
            "completed_tables": tables,
            "score": score,
        }),
    )
    .row("Experience", experience)
    .row("Caught", caught)
    .row("Completed tables", tables.len())
    .row("Score", score)
}

pub fn streak_report(dates: &[NaiveDate], today: NaiveDate) -> Report {
    let streak = calculate_streak(dates, today);
    Report::new(
        "Activity Streak",
        json!({
            "today": today,
            "activity_days": dates.len(),
            "streak_days": streak,
            "daily_bonus": calculate_daily_bonus(streak),
        }),
    )
    .row("Today", today)
    .row("Streak days", streak)
    .row("Daily bonus", calculate_daily_bonus(streak))
}

pub fn trainer_report(path: &Path) -> Result<Report> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let progress: TrainerProgress = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse trainer snapshot {}", path.display()))?;
    let summary = progress.summary();
    let achievements = evaluate_achievements(&progress);
    let mut report = Report::new(
        "Trainer Summary",
        json!({
            "progress": progress,
            "summary": summary,
            "achievements": &achievements,
        }),
    )
    .row("Level", summary.level)
    .row("To next level", summary.exp_to_next_level)
    .row("Band progress", format!("{:.1}%", summary.level_progress))
    .row("Leaderboard", summary.leaderboard_score)
    .row("Daily bonus", summary.daily_bonus);
    for achievement in achievements {
        report = report.note(format!("🏅 {}", achievement.title()));
    }
    Ok(report)
}

pub fn verify_report() -> Report {
    let mut report = Report::new(
        "Stage Table Verification",
        json!({ "table": STAGE_REDUCTIONS }),
    )
    .row("Records", STAGE_REDUCTIONS.len());
    match validate_reduction_table(&STAGE_REDUCTIONS) {
        Ok(()) => report.note("all reduction records satisfy their invariants"),
        Err(errors) => {
            log::error!("stage table has {} violation(s)", errors.len());
            for err in errors {
                report = report.note(err.to_string());
            }
            report.failed()
        }
    }
}

pub fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    Ok(raw.parse::<Difficulty>()?)
}
