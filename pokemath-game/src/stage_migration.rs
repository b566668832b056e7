//! Stage reduction table and the migration of legacy region progress.
//!
//! Regions 3, 4, 6, 7 and 8 originally shipped with 6 to 9 stages and were
//! cut down to 3. Each affected region carries a hand-authored mapping that
//! folds the old stages onto the new ones in three contiguous bands. The
//! remaining regions keep their original layout.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::constants::{DEFAULT_STAGE_COUNT, MINUTES_PER_STAGE, REDUCED_STAGE_COUNT};
use crate::numbers::round_f64_to_u32;

/// Reduction record for one affected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMigrationConfig {
    pub region_id: u32,
    pub old_stage_count: u32,
    pub new_stage_count: u32,
    /// Old stages kept as representatives of the three new stages.
    pub selected_stages: [u32; 3],
    /// New stage for each old stage; index 0 holds old stage 1.
    pub stage_mapping: &'static [u32],
}

impl StageMigrationConfig {
    /// New stage for an old stage number, or `None` outside the old range.
    #[must_use]
    pub fn lookup(&self, old_stage: u32) -> Option<u32> {
        let index = usize::try_from(old_stage.checked_sub(1)?).ok()?;
        self.stage_mapping.get(index).copied()
    }

    /// `(old_stage, new_stage)` pairs in old-stage order.
    pub fn mapping_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1..).zip(self.stage_mapping.iter().copied())
    }

    /// Check the structural invariants of this record.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), StageTableError> {
        let region = self.region_id;
        if self.new_stage_count != REDUCED_STAGE_COUNT {
            return Err(StageTableError::NewStageCount {
                region,
                count: self.new_stage_count,
            });
        }
        let mapped = u32::try_from(self.stage_mapping.len()).unwrap_or(u32::MAX);
        if mapped != self.old_stage_count {
            return Err(StageTableError::IncompleteMapping {
                region,
                expected: self.old_stage_count,
                mapped,
            });
        }
        let [first, _, last] = self.selected_stages;
        if first != 1 || last != self.old_stage_count {
            return Err(StageTableError::SelectedStages {
                region,
                selected: self.selected_stages,
            });
        }
        let mut previous = 0;
        for (old_stage, new_stage) in self.mapping_pairs() {
            if !(1..=self.new_stage_count).contains(&new_stage) {
                return Err(StageTableError::TargetOutOfRange {
                    region,
                    old_stage,
                    new_stage,
                });
            }
            let step = new_stage - previous.min(new_stage);
            if new_stage < previous || step > 1 {
                return Err(StageTableError::NonContiguous { region, old_stage });
            }
            previous = new_stage;
        }
        if self.lookup(1) != Some(1) || self.lookup(self.old_stage_count) != Some(self.new_stage_count)
        {
            return Err(StageTableError::Endpoints { region });
        }
        for (slot, stage) in self.selected_stages.iter().enumerate() {
            let expected = u32::try_from(slot).unwrap_or(0) + 1;
            if self.lookup(*stage) != Some(expected) {
                return Err(StageTableError::SelectedStages {
                    region,
                    selected: self.selected_stages,
                });
            }
        }
        Ok(())
    }
}

/// Invariant violations in the reduction table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageTableError {
    #[error("region {region}: reduced layout must have 3 stages (got {count})")]
    NewStageCount { region: u32, count: u32 },
    #[error("region {region}: mapping covers {mapped} of {expected} old stages")]
    IncompleteMapping {
        region: u32,
        expected: u32,
        mapped: u32,
    },
    #[error("region {region}: old stage {old_stage} maps to {new_stage}, outside the new layout")]
    TargetOutOfRange {
        region: u32,
        old_stage: u32,
        new_stage: u32,
    },
    #[error("region {region}: bands are not contiguous at old stage {old_stage}")]
    NonContiguous { region: u32, old_stage: u32 },
    #[error("region {region}: first and last old stages must map to the first and last new stages")]
    Endpoints { region: u32 },
    #[error("region {region}: selected stages {selected:?} do not represent bands 1, 2, 3")]
    SelectedStages { region: u32, selected: [u32; 3] },
    #[error("region {region} appears more than once in the reduction table")]
    DuplicateRegion { region: u32 },
}

const fn reduction(
    region_id: u32,
    selected_stages: [u32; 3],
    stage_mapping: &'static [u32],
) -> StageMigrationConfig {
    StageMigrationConfig {
        region_id,
        old_stage_count: selected_stages[2],
        new_stage_count: REDUCED_STAGE_COUNT,
        selected_stages,
        stage_mapping,
    }
}

/// Every region whose stage count was reduced.
pub const STAGE_REDUCTIONS: [StageMigrationConfig; 5] = [
    reduction(3, [1, 3, 6], &[1, 1, 2, 2, 3, 3]),
    reduction(4, [1, 4, 7], &[1, 1, 2, 2, 2, 3, 3]),
    reduction(6, [1, 4, 8], &[1, 1, 1, 2, 2, 3, 3, 3]),
    reduction(7, [1, 5, 9], &[1, 1, 1, 2, 2, 2, 3, 3, 3]),
    reduction(8, [1, 4, 8], &[1, 1, 1, 2, 2, 3, 3, 3]),
];

/// Stage counts of the regions left untouched by the reduction.
const UNCHANGED_STAGE_COUNTS: [(u32, u32); 3] = [(2, 5), (5, 5), (9, 10)];

/// Reduction record for a region, if it was affected.
#[must_use]
pub fn reduction_for(region_id: u32) -> Option<&'static StageMigrationConfig> {
    STAGE_REDUCTIONS
        .iter()
        .find(|config| config.region_id == region_id)
}

fn unchanged_stage_count(region_id: u32) -> u32 {
    UNCHANGED_STAGE_COUNTS
        .iter()
        .find(|(id, _)| *id == region_id)
        .map_or(DEFAULT_STAGE_COUNT, |(_, count)| *count)
}

#[must_use]
pub fn is_region_affected(region_id: u32) -> bool {
    reduction_for(region_id).is_some()
}

/// Stage count after the reduction. Unknown regions default to 5.
#[must_use]
pub fn get_new_stage_count(region_id: u32) -> u32 {
    reduction_for(region_id).map_or_else(
        || unchanged_stage_count(region_id),
        |config| config.new_stage_count,
    )
}

/// Stage count before the reduction. Unknown regions default to 5.
#[must_use]
pub fn get_legacy_stage_count(region_id: u32) -> u32 {
    reduction_for(region_id).map_or_else(
        || unchanged_stage_count(region_id),
        |config| config.old_stage_count,
    )
}

/// Translate a legacy stage number into the reduced layout.
///
/// Unaffected regions return the stage unchanged. Old stage numbers outside
/// an affected region's mapping resolve to stage 1; persisted progress
/// already relies on this, so bad input is not rejected here.
#[must_use]
pub fn map_old_stage_to_new(region_id: u32, old_stage: u32) -> u32 {
    match reduction_for(region_id) {
        Some(config) => config.lookup(old_stage).unwrap_or_else(|| {
            log::debug!("region {region_id}: old stage {old_stage} outside mapping, using stage 1");
            1
        }),
        None => old_stage,
    }
}

/// Result of migrating a trainer's completed regions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationOutcome {
    pub converted_progress: BTreeMap<u32, bool>,
    pub migration_log: Vec<String>,
}

/// Carry whole-region completion over to the reduced layout.
///
/// Completion is preserved for every region; stage-level progress is not
/// migrated. One log line is written per input id.
#[must_use]
pub fn migrate_user_progress(completed_region_ids: &[u32]) -> MigrationOutcome {
    let mut outcome = MigrationOutcome::default();
    for &region_id in completed_region_ids {
        outcome.converted_progress.insert(region_id, true);
        let line = match reduction_for(region_id) {
            Some(config) => format!(
                "Region {region_id}: {} stages reduced to {}, completion preserved",
                config.old_stage_count, config.new_stage_count
            ),
            None => format!(
                "Region {region_id}: unchanged ({} stages), completion preserved",
                get_new_stage_count(region_id)
            ),
        };
        log::debug!("{line}");
        outcome.migration_log.push(line);
    }
    outcome
}

/// Play time saved by the reduction, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeReduction {
    pub original_time: u32,
    pub reduced_time: u32,
    pub reduction_percentage: u32,
}

/// Time saved for a region. Unaffected regions report all zeros.
#[must_use]
pub fn calculate_time_reduction(region_id: u32) -> TimeReduction {
    let Some(config) = reduction_for(region_id) else {
        return TimeReduction::default();
    };
    let original_time = config.old_stage_count * MINUTES_PER_STAGE;
    let reduced_time = config.new_stage_count * MINUTES_PER_STAGE;
    TimeReduction {
        original_time,
        reduced_time,
        reduction_percentage: percentage(original_time - reduced_time, original_time),
    }
}

/// Aggregate effect of the reduction across all affected regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationStats {
    pub total_affected_regions: u32,
    pub total_stage_reduction: u32,
    /// Weighted by stage count: total removed over total original stages.
    pub avg_reduction_percentage: u32,
}

#[must_use]
pub fn get_migration_stats() -> MigrationStats {
    let total_old: u32 = STAGE_REDUCTIONS.iter().map(|c| c.old_stage_count).sum();
    let total_stage_reduction: u32 = STAGE_REDUCTIONS
        .iter()
        .map(|c| c.old_stage_count.saturating_sub(c.new_stage_count))
        .sum();
    MigrationStats {
        total_affected_regions: u32::try_from(STAGE_REDUCTIONS.len()).unwrap_or(u32::MAX),
        total_stage_reduction,
        avg_reduction_percentage: percentage(total_stage_reduction, total_old),
    }
}

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_f64_to_u32(f64::from(part) / f64::from(whole) * 100.0)
}

/// Validate every record plus table-wide uniqueness.
///
/// # Errors
///
/// Returns every violation found, in table order.
pub fn validate_reduction_table(table: &[StageMigrationConfig]) -> Result<(), Vec<StageTableError>> {
    let mut errors = Vec::new();
    for (idx, config) in table.iter().enumerate() {
        if table[..idx].iter().any(|c| c.region_id == config.region_id) {
            errors.push(StageTableError::DuplicateRegion {
                region: config.region_id,
            });
        }
        if let Err(err) = config.validate() {
            errors.push(err);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
