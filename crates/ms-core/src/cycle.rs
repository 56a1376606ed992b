//! Cycle partitioning and aggregate statistics.
//!
//! Pure and stateless given a store snapshot. A cycle is the integer tag
//! grouping segments that belong to one pass through a repeated work
//! sequence.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::measurement::Measurement;
use crate::types::Category;

/// Measurements belonging to the given cycle, in snapshot order.
#[must_use]
pub fn filter_by_cycle(snapshot: &[Measurement], cycle: u32) -> Vec<&Measurement> {
    snapshot.iter().filter(|m| m.cycle == cycle).collect()
}

/// Total measured duration per cycle, keyed and ordered by cycle index.
#[must_use]
pub fn cycle_totals(snapshot: &[Measurement]) -> BTreeMap<u32, f64> {
    let mut totals = BTreeMap::new();
    for m in snapshot {
        *totals.entry(m.cycle).or_insert(0.0) += m.duration;
    }
    totals
}

/// Aggregate statistics across cycle totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleSummary {
    /// Number of distinct cycles observed.
    pub cycles: usize,
    pub avg_cycle_time: f64,
    pub min_cycle_time: f64,
    pub max_cycle_time: f64,
}

/// Summarizes cycle times, or `None` when the snapshot is empty.
#[must_use]
pub fn summarize(snapshot: &[Measurement]) -> Option<CycleSummary> {
    let totals = cycle_totals(snapshot);
    if totals.is_empty() {
        return None;
    }

    let times: Vec<f64> = totals.values().copied().collect();
    let sum: f64 = times.iter().sum();
    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    #[expect(clippy::cast_precision_loss, reason = "cycle counts are small")]
    let avg = sum / times.len() as f64;

    Some(CycleSummary {
        cycles: times.len(),
        avg_cycle_time: avg,
        min_cycle_time: min,
        max_cycle_time: max,
    })
}

/// Per-element statistics across repetitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementStats {
    pub name: String,
    pub category: Category,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std_dev: f64,
    pub total: f64,
}

/// Groups measurements by element name and computes duration statistics for
/// each group, sorted by name for stable output.
#[must_use]
pub fn element_stats(snapshot: &[Measurement]) -> Vec<ElementStats> {
    let mut groups: BTreeMap<&str, (Category, Vec<f64>)> = BTreeMap::new();
    for m in snapshot {
        groups
            .entry(&m.element_name)
            .or_insert_with(|| (m.category, Vec::new()))
            .1
            .push(m.duration);
    }

    groups
        .into_iter()
        .map(|(name, (category, durations))| {
            let count = durations.len();
            let total: f64 = durations.iter().sum();
            let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
            let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            #[expect(clippy::cast_precision_loss, reason = "repetition counts are small")]
            let n = count as f64;
            let avg = total / n;
            let variance = durations.iter().map(|d| (d - avg).powi(2)).sum::<f64>() / n;

            ElementStats {
                name: name.to_string(),
                category,
                count,
                min,
                max,
                avg,
                std_dev: variance.sqrt(),
                total,
            }
        })
        .collect()
}
