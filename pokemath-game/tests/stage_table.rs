use pokemath_game::{
    FeatureFlags, Region, STAGE_REDUCTIONS, StageLayout, StageLayoutPhase,
    calculate_time_reduction, get_legacy_stage_count, get_migration_stats, get_new_stage_count,
    is_region_affected, map_old_stage_to_new, migrate_user_progress, validate_reduction_table,
};
use serde_json::json;

#[test]
fn affected_set_is_exact() {
    let affected: Vec<u32> = (0..=20).filter(|id| is_region_affected(*id)).collect();
    assert_eq!(affected, vec![3, 4, 6, 7, 8]);
}

#[test]
fn first_and_last_old_stage_map_to_first_and_last_new_stage() {
    for config in &STAGE_REDUCTIONS {
        assert_eq!(map_old_stage_to_new(config.region_id, 1), 1);
        assert_eq!(
            map_old_stage_to_new(config.region_id, config.old_stage_count),
            3
        );
    }
}

#[test]
fn every_band_is_contiguous_and_non_empty() {
    for config in &STAGE_REDUCTIONS {
        let mapped: Vec<u32> = (1..=config.old_stage_count)
            .map(|stage| map_old_stage_to_new(config.region_id, stage))
            .collect();
        assert!(mapped.windows(2).all(|pair| pair[1] == pair[0] || pair[1] == pair[0] + 1));
        for band in 1..=3 {
            assert!(mapped.contains(&band), "region {} band {band}", config.region_id);
        }
    }
    assert_eq!(validate_reduction_table(&STAGE_REDUCTIONS), Ok(()));
}

#[test]
fn table_serializes_with_stable_shape() {
    let value = serde_json::to_value(STAGE_REDUCTIONS[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "region_id": 3,
            "old_stage_count": 6,
            "new_stage_count": 3,
            "selected_stages": [1, 3, 6],
            "stage_mapping": [1, 1, 2, 2, 3, 3],
        })
    );
}

#[test]
fn every_region_has_a_stage_count_in_both_layouts() {
    for region in Region::ALL {
        let id = region.number();
        assert!(get_new_stage_count(id) <= get_legacy_stage_count(id));
        if !is_region_affected(id) {
            assert_eq!(get_new_stage_count(id), get_legacy_stage_count(id));
        }
    }
}

#[test]
fn time_reduction_reference_values() {
    let reduction = calculate_time_reduction(3);
    assert_eq!(
        (reduction.original_time, reduction.reduced_time, reduction.reduction_percentage),
        (48, 24, 50)
    );
    let untouched = calculate_time_reduction(2);
    assert_eq!(
        (untouched.original_time, untouched.reduced_time, untouched.reduction_percentage),
        (0, 0, 0)
    );
}

#[test]
fn stats_are_weighted_by_stage_count() {
    let stats = get_migration_stats();
    assert_eq!(stats.total_affected_regions, 5);
    let mean_of_percentages: u32 = STAGE_REDUCTIONS
        .iter()
        .map(|c| calculate_time_reduction(c.region_id).reduction_percentage)
        .sum::<u32>()
        / 5;
    assert_eq!(stats.avg_reduction_percentage, 61);
    assert_ne!(stats.avg_reduction_percentage, mean_of_percentages);
}

#[test]
fn migration_outcome_serializes_for_api_layer() {
    let outcome = migrate_user_progress(&[3, 5]);
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["converted_progress"], json!({ "3": true, "5": true }));
    assert_eq!(value["migration_log"].as_array().map(Vec::len), Some(2));
}

#[test]
fn legacy_phase_serves_original_layout() {
    let flags = FeatureFlags {
        stage_layout: StageLayoutPhase::Legacy,
        debug_logs: false,
    };
    let layout = StageLayout::new(&flags);
    for config in &STAGE_REDUCTIONS {
        assert_eq!(layout.stage_count(config.region_id), config.old_stage_count);
        assert_eq!(
            layout.resolve_stage(config.region_id, config.old_stage_count),
            config.old_stage_count
        );
    }
}
