//! Tests for allocation sequence generation.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use blockrand_core::{AllocationSchedule, generate_block_randomization};
use blockrand_model::{AssignmentRecord, ModelError, RandomizationConfig};

fn generate(config: &RandomizationConfig, seed: u64) -> AllocationSchedule {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_block_randomization(config, &mut rng).expect("valid config")
}

/// Treatment counts per block, keyed by block name.
fn counts_by_block(records: &[AssignmentRecord]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.block_id.to_string())
            .or_default()
            .entry(record.treatment.clone())
            .or_default() += 1;
    }
    counts
}

#[test]
fn default_run_has_three_balanced_blocks() {
    let schedule = generate(&RandomizationConfig::default(), 7);

    assert_eq!(schedule.records.len(), 30);
    assert_eq!(schedule.summary.num_blocks, 3);
    assert_eq!(schedule.summary.block_size, 10);
    assert!(!schedule.summary.is_adjusted());

    let counts = counts_by_block(&schedule.records);
    assert_eq!(
        counts.keys().cloned().collect::<Vec<_>>(),
        vec!["Block 1", "Block 2", "Block 3"]
    );
    for per_treatment in counts.values() {
        assert_eq!(per_treatment.get("Treatment"), Some(&5));
        assert_eq!(per_treatment.get("Control"), Some(&5));
    }
    assert!(schedule.records.iter().all(|r| r.block_size == 10));
}

#[test]
fn small_target_rounds_up_to_one_block() {
    let config = RandomizationConfig::default().with_target(7);
    let schedule = generate(&config, 1);

    assert_eq!(schedule.summary.num_blocks, 1);
    assert_eq!(schedule.records.len(), 10);
    assert_eq!(schedule.summary.target_sample_size, 7);
    assert_eq!(schedule.summary.actual_allocation_size, 10);
    assert!(schedule.summary.is_adjusted());
}

#[test]
fn zero_target_still_yields_one_block() {
    let config = RandomizationConfig::default().with_target(0);
    let schedule = generate(&config, 3);

    assert_eq!(schedule.summary.num_blocks, 1);
    assert_eq!(schedule.records.len(), 10);
    assert_eq!(schedule.summary.adjustment_warning(), None);
}

#[test]
fn empty_labels_are_rejected() {
    let config = RandomizationConfig::default().with_treatments(Vec::<String>::new());
    let mut rng = StdRng::seed_from_u64(0);
    let result = generate_block_randomization(&config, &mut rng);
    assert_eq!(result, Err(ModelError::EmptyTreatments));
}

#[test]
fn zero_multiplier_is_rejected() {
    let config = RandomizationConfig::default().with_multiplier(0);
    let mut rng = StdRng::seed_from_u64(0);
    let result = generate_block_randomization(&config, &mut rng);
    assert_eq!(result, Err(ModelError::NonPositiveMultiplier));
}

#[test]
fn oversized_allocations_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    for config in [
        RandomizationConfig::default().with_multiplier(usize::MAX),
        RandomizationConfig::default().with_target(usize::MAX),
        RandomizationConfig::default()
            .with_target(usize::MAX / 2)
            .with_multiplier(usize::MAX / 4),
    ] {
        let result = generate_block_randomization(&config, &mut rng);
        assert!(
            matches!(result, Err(ModelError::AllocationTooLarge { .. })),
            "expected AllocationTooLarge for target {} multiplier {}",
            config.target,
            config.multiplier
        );
    }
}

#[test]
fn block_names_use_prefix() {
    let config = RandomizationConfig::default()
        .with_target(25)
        .with_block_prefix("Site A / ");
    let schedule = generate(&config, 11);
    let names: Vec<String> = counts_by_block(&schedule.records).into_keys().collect();
    assert_eq!(names, vec!["Site A / 1", "Site A / 2", "Site A / 3"]);
}

#[test]
fn unseeded_runs_stay_balanced() {
    let config = RandomizationConfig::default();
    for _ in 0..5 {
        let schedule =
            generate_block_randomization(&config, &mut rand::thread_rng()).expect("valid config");
        for per_treatment in counts_by_block(&schedule.records).values() {
            assert!(per_treatment.values().all(|&count| count == 5));
        }
    }
}

fn config_strategy() -> impl Strategy<Value = RandomizationConfig> {
    (1usize..200, 1usize..6, 1usize..6, "[A-Z]{1,3} ").prop_map(
        |(target, arms, multiplier, prefix)| {
            RandomizationConfig::default()
                .with_target(target)
                .with_treatments((0..arms).map(|arm| format!("Arm {arm}")))
                .with_multiplier(multiplier)
                .with_block_prefix(prefix)
        },
    )
}

proptest! {
    #[test]
    fn every_block_is_balanced(config in config_strategy(), seed in any::<u64>()) {
        let schedule = generate(&config, seed);
        let counts = counts_by_block(&schedule.records);
        prop_assert_eq!(counts.len(), schedule.summary.num_blocks);
        for per_treatment in counts.values() {
            prop_assert_eq!(per_treatment.len(), config.arms());
            for count in per_treatment.values() {
                prop_assert_eq!(*count, config.multiplier);
            }
        }
        prop_assert_eq!(schedule.summary.block_size, config.multiplier * config.arms());
    }

    #[test]
    fn ids_are_contiguous_from_one(config in config_strategy(), seed in any::<u64>()) {
        let schedule = generate(&config, seed);
        for (index, record) in schedule.records.iter().enumerate() {
            prop_assert_eq!(record.id as usize, index + 1);
        }
    }

    #[test]
    fn whole_blocks_cover_target(config in config_strategy(), seed in any::<u64>()) {
        let schedule = generate(&config, seed);
        let block_size = config.block_size();
        let expected_blocks = config.target.div_ceil(block_size);
        prop_assert_eq!(schedule.summary.num_blocks, expected_blocks);
        prop_assert_eq!(schedule.records.len(), expected_blocks * block_size);
        prop_assert!(schedule.records.len() >= config.target);
    }
}
