//! Repetition-based second-order aggregates.
//!
//! Karmic tasks and business periods share one rule: count occurrences
//! in a candidate multiset, keep the distinct values that occur at least
//! `threshold` times, and reduce sums modulo 22. Only the threshold and
//! the candidate group differ (tasks use 3+, periods 2+), so both are
//! built on the same helper.

use std::collections::BTreeMap;

use crate::pgd::matrix::MODULUS;
use crate::pgd::result::{Ancestral, BusinessPeriods, Crossroads, KarmicTasks, MainPoints};

/// Minimum occurrence count for a value to feed a karmic task.
pub const TASK_THRESHOLD: usize = 3;
/// Minimum occurrence count for a value to feed a business period.
pub const PERIOD_THRESHOLD: usize = 2;

/// Distinct values of `values` occurring at least `threshold` times,
/// ascending.
fn repeated_values(values: &[u8], threshold: usize) -> Vec<u8> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(v, _)| v)
        .collect()
}

fn reduced_sum(values: &[u8]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    Some((values.iter().map(|&v| u64::from(v)).sum::<u64>() % MODULUS) as u8)
}

/// Mod-22 sum of the distinct values repeating `threshold`+ times in
/// `values`, or `None` when nothing repeats that often.
fn repeated_sum(values: &[u8], threshold: usize) -> Option<u8> {
    reduced_sum(&repeated_values(values, threshold))
}

/// Derives the three karmic tasks. Each task restarts from the main
/// matrix and is independent of the others; only the candidate group
/// changes.
pub fn karmic_tasks(
    main: &MainPoints,
    ancestral: &Ancestral,
    crossroads: &Crossroads,
) -> KarmicTasks {
    let main_values = main.defined_values();

    let karma_of_genus = repeated_sum(&main_values, TASK_THRESHOLD);

    let mut with_ancestral = main_values.clone();
    with_ancestral.extend(ancestral.defined_values());
    let personal_karma_relationships = repeated_sum(&with_ancestral, TASK_THRESHOLD);

    let mut with_crossroads = main_values;
    with_crossroads.extend(crossroads.defined_values());
    let divine_tax = repeated_sum(&with_crossroads, TASK_THRESHOLD);

    KarmicTasks {
        karma_of_genus,
        personal_karma_relationships,
        divine_tax,
    }
}

/// Derives the business periods from the main matrix alone. Returns
/// `None` when no value repeats at all — an absent block, not an empty
/// one.
pub fn business_periods(main: &MainPoints) -> Option<BusinessPeriods> {
    let repeated = repeated_values(&main.defined_values(), PERIOD_THRESHOLD);
    if repeated.is_empty() {
        return None;
    }

    let in_range = |lo: u8, hi: u8| -> Vec<u8> {
        repeated
            .iter()
            .copied()
            .filter(|&v| lo <= v && v <= hi)
            .collect()
    };

    let period_1 = reduced_sum(&in_range(1, 10));
    let period_2 = reduced_sum(&in_range(11, 20));
    let boundary: Vec<u8> = repeated
        .iter()
        .copied()
        .filter(|&v| v == 0 || v == 21)
        .collect();
    let period_3 = reduced_sum(&boundary);

    let defined: Vec<u8> = [period_1, period_2, period_3]
        .into_iter()
        .flatten()
        .collect();
    let period_4 = reduced_sum(&defined);

    Some(BusinessPeriods {
        period_1,
        period_2,
        period_3,
        period_4,
    })
}
