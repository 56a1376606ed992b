//! Per-segment, per-category stopwatches driven by the media clock.
//!
//! A running timer is nothing more than a `(measurement, category)` key
//! mapped to the clock time at which it started. Stopping converts the
//! elapsed video time into the measurement's accumulated sub-duration.
//! Entries are transient session state and are never persisted.

use std::collections::HashMap;

use thiserror::Error;

use crate::measurement::{Measurement, SubCategory};
use crate::types::MeasurementId;

/// Errors from stopwatch operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StopwatchError {
    /// A stopwatch command arrived with no segment selected or active.
    #[error("no element is selected or active at the current time")]
    NoActiveSegment,
}

/// The set of running stopwatches for one analysis session.
#[derive(Debug, Clone, Default)]
pub struct StopwatchBank {
    running: HashMap<(MeasurementId, SubCategory), f64>,
}

impl StopwatchBank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a timer is running for the given key.
    #[must_use]
    pub fn is_running(&self, id: &MeasurementId, category: SubCategory) -> bool {
        self.running.contains_key(&(id.clone(), category))
    }

    /// Starts (or restarts) the timer for the given key at `now`.
    ///
    /// Starting an already-running timer re-keys the start value, which
    /// restarts the interval. That is the intended pause/resume idiom:
    /// callers that want to accumulate must stop first.
    pub fn start(&mut self, id: &MeasurementId, category: SubCategory, now: f64) {
        let previous = self.running.insert((id.clone(), category), now);
        if previous.is_some() {
            tracing::debug!(id = %id, category = %category, at = now, "stopwatch restarted");
        } else {
            tracing::debug!(id = %id, category = %category, at = now, "stopwatch started");
        }
    }

    /// Stops the timer for the given key, returning the non-negative elapsed
    /// time since start. Returns `None` when no timer was running.
    pub fn stop(&mut self, id: &MeasurementId, category: SubCategory, now: f64) -> Option<f64> {
        let started_at = self.running.remove(&(id.clone(), category))?;
        let delta = (now - started_at).max(0.0);
        tracing::debug!(id = %id, category = %category, delta, "stopwatch stopped");
        Some(delta)
    }

    /// Discards every running timer for a measurement (e.g. after deletion).
    pub fn clear_measurement(&mut self, id: &MeasurementId) {
        self.running.retain(|(key_id, _), _| key_id != id);
    }

    /// Number of running timers.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }
}

/// Applies a stopped timer's elapsed time to the matching measurement in a
/// snapshot, returning the replacement collection.
///
/// Only the matching measurement changes. The accumulated value floors at
/// zero and has no upper bound; over-allocation is caught later at
/// explicit-edit time, not here.
#[must_use]
pub fn apply_elapsed(
    snapshot: &[Measurement],
    id: &MeasurementId,
    category: SubCategory,
    delta: f64,
) -> Vec<Measurement> {
    snapshot
        .iter()
        .map(|m| {
            if &m.id == id {
                let mut updated = m.clone();
                updated.add_sub_time(category, delta);
                updated
            } else {
                m.clone()
            }
        })
        .collect()
}
