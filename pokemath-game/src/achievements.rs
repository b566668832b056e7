//! Trainer milestones.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::region::Region;
use crate::trainer::TrainerProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstCatch,
    Collector,
    MasterCollector,
    FirstTable,
    HalfwayThere,
    TableMaster,
    WeekStreak,
    MonthStreak,
    RisingTrainer,
    EliteTrainer,
}

impl Achievement {
    pub const ALL: [Self; 10] = [
        Self::FirstCatch,
        Self::Collector,
        Self::MasterCollector,
        Self::FirstTable,
        Self::HalfwayThere,
        Self::TableMaster,
        Self::WeekStreak,
        Self::MonthStreak,
        Self::RisingTrainer,
        Self::EliteTrainer,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstCatch => "First Catch",
            Self::Collector => "Collector",
            Self::MasterCollector => "Master Collector",
            Self::FirstTable => "First Table",
            Self::HalfwayThere => "Halfway There",
            Self::TableMaster => "Table Master",
            Self::WeekStreak => "Week Streak",
            Self::MonthStreak => "Month Streak",
            Self::RisingTrainer => "Rising Trainer",
            Self::EliteTrainer => "Elite Trainer",
        }
    }

    fn is_earned(self, progress: &TrainerProgress, distinct_tables: usize) -> bool {
        match self {
            Self::FirstCatch => progress.caught_count >= 1,
            Self::Collector => progress.caught_count >= 10,
            Self::MasterCollector => progress.caught_count >= 50,
            Self::FirstTable => distinct_tables >= 1,
            Self::HalfwayThere => distinct_tables >= Region::ALL.len() / 2,
            Self::TableMaster => distinct_tables == Region::ALL.len(),
            Self::WeekStreak => progress.streak_days >= 7,
            Self::MonthStreak => progress.streak_days >= 30,
            Self::RisingTrainer => progress.level() >= 5,
            Self::EliteTrainer => progress.level() >= 10,
        }
    }
}

/// Every milestone the trainer has reached, in declaration order.
///
/// Only distinct tables in 2..=9 count toward the table milestones.
#[must_use]
pub fn evaluate_achievements(progress: &TrainerProgress) -> Vec<Achievement> {
    let distinct_tables = progress
        .completed_tables
        .iter()
        .filter_map(|table| Region::from_number(*table))
        .collect::<BTreeSet<_>>()
        .len();
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_earned(progress, distinct_tables))
        .collect()
}
