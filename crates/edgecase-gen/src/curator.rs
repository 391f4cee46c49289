//! Quota- and score-based curation
//!
//! Selection runs in two phases over one global ranking (score descending,
//! canonical key ascending):
//!
//! 1. Walk the category priority order and take up to each category's quota.
//! 2. If still short, top up from everything left, in rank order.
//!
//! The result is then re-sorted by `(priority index, canonical key)`, which is
//! the order callers observe.

use crate::config::EngineConfig;
use crate::enrich::EnrichedCase;
use std::cmp::Ordering;
use tracing::debug;

const TARGET_WEIGHT: usize = 5;
const PERFORMANCE_BONUS: usize = 10;

/// Ranking score: more targets, smaller inputs and performance cases first
#[must_use]
pub fn score(case: &EnrichedCase) -> usize {
    let performance = if case.targets_performance() {
        PERFORMANCE_BONUS
    } else {
        0
    };
    TARGET_WEIGHT * case.case.targets.len() + case.size_bucket.size_score() + performance
}

/// Total order used for ranking: score descending, key ascending
fn rank_order(a: &EnrichedCase, b: &EnrichedCase) -> Ordering {
    score(b)
        .cmp(&score(a))
        .then_with(|| a.canonical_key().cmp(b.canonical_key()))
}

/// Select and order at most `desired` cases from a unique, enriched pool
#[must_use]
pub fn curate(
    pool: Vec<EnrichedCase>,
    graph_tagged: bool,
    desired: usize,
    config: &EngineConfig,
) -> Vec<EnrichedCase> {
    let quotas = config.quotas_for(graph_tagged);
    let mut ranked = pool;
    ranked.sort_by(rank_order);

    let mut taken = vec![false; ranked.len()];
    let mut picked = 0;

    for category in &config.category_priority {
        let quota = quotas.get(category).copied().unwrap_or(0);
        let mut from_category = 0;
        for (case, slot) in ranked.iter().zip(taken.iter_mut()) {
            if picked >= desired || from_category >= quota {
                break;
            }
            if !*slot && case.category == *category {
                *slot = true;
                picked += 1;
                from_category += 1;
            }
        }
    }
    let by_quota = picked;

    for slot in &mut taken {
        if picked >= desired {
            break;
        }
        if !*slot {
            *slot = true;
            picked += 1;
        }
    }
    debug!(
        pool = ranked.len(),
        desired,
        by_quota,
        by_fill = picked - by_quota,
        "curated"
    );

    let mut selected: Vec<EnrichedCase> = ranked
        .into_iter()
        .zip(taken)
        .filter_map(|(case, slot)| slot.then_some(case))
        .collect();
    selected.sort_by(|a, b| {
        config
            .priority_index(&a.category)
            .cmp(&config.priority_index(&b.category))
            .then_with(|| a.canonical_key().cmp(b.canonical_key()))
    });
    selected
}
