//! The segment store: the authoritative ordered collection of measurements.
//!
//! Mutations are whole-collection replacements (`replace_all`) or simple
//! add/remove; there is no targeted patching. Callers read a snapshot,
//! compute a replacement, and commit it, which keeps the single-threaded
//! last-writer-wins discipline trivial to uphold.

use crate::measurement::{Measurement, MeasurementDraft};
use crate::types::MeasurementId;

/// Ordered collection of measurements.
///
/// Insertion order is preserved but carries no semantic meaning; displays
/// typically sort by start time, the store does not enforce it. Overlapping
/// intervals are allowed by design.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    measurements: Vec<Measurement>,
}

impl SegmentStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            measurements: Vec::new(),
        }
    }

    /// Creates a store from an existing sequence (e.g. a loaded project).
    #[must_use]
    pub const fn from_measurements(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    /// Materializes a draft, appends it, and returns the stored measurement.
    pub fn add(&mut self, draft: MeasurementDraft) -> Measurement {
        let measurement = draft.build();
        tracing::debug!(
            id = %measurement.id,
            name = %measurement.element_name,
            start = measurement.start_time,
            end = measurement.end_time,
            "measurement added"
        );
        self.measurements.push(measurement.clone());
        measurement
    }

    /// Removes the measurement with the given ID. Returns false if absent.
    pub fn remove(&mut self, id: &MeasurementId) -> bool {
        let before = self.measurements.len();
        self.measurements.retain(|m| &m.id != id);
        self.measurements.len() < before
    }

    /// Replaces the whole collection.
    pub fn replace_all(&mut self, measurements: Vec<Measurement>) {
        self.measurements = measurements;
    }

    /// Returns the measurement with the given ID.
    #[must_use]
    pub fn get(&self, id: &MeasurementId) -> Option<&Measurement> {
        self.measurements.iter().find(|m| &m.id == id)
    }

    /// Returns the first measurement whose closed interval contains `t`.
    ///
    /// Overlap is not prevented, so several measurements may qualify; the
    /// first match in store order wins.
    #[must_use]
    pub fn active_at(&self, t: f64) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.contains(t))
    }

    /// Read-only view of the current snapshot.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Owned copy of the current snapshot, for compute-then-replace edits.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    /// The largest end time across all measurements, or `None` when empty.
    ///
    /// This is the frontier that auto-append and mark-start extend from.
    #[must_use]
    pub fn latest_end_time(&self) -> Option<f64> {
        self.measurements
            .iter()
            .map(|m| m.end_time)
            .max_by(f64::total_cmp)
    }

    /// Number of measurements in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// True when the store holds no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
