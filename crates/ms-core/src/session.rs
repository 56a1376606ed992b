//! Analysis session: the single-threaded event funnel.
//!
//! A [`StudySession`] owns the clock handle, the segment store, the
//! stopwatch bank, and the small bits of interaction state (pending mark,
//! selection, cycle counter). Every handler reads the latest store snapshot
//! before computing its replacement, so a drag commit can never clobber a
//! stopwatch stop that landed between mouse-down and mouse-up.

use crate::clock::ClockAdapter;
use crate::editor::{self, DragGesture, SplitError, TrackGeometry};
use crate::measurement::{Measurement, MeasurementDraft, SubCategory};
use crate::stopwatch::{self, StopwatchBank, StopwatchError};
use crate::store::SegmentStore;
use crate::types::{Category, MeasurementId, Therblig};
use crate::validate::{self, EditError, Report, Warning};

/// What a quick-categorize toggle did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleOutcome {
    /// A stopwatch started; playback may have been resumed as a side effect.
    Started,
    /// A stopwatch stopped and its elapsed time was accumulated.
    Stopped { elapsed: f64 },
}

/// One analyst's working session over a recording.
#[derive(Debug)]
pub struct StudySession<C: ClockAdapter> {
    clock: C,
    store: SegmentStore,
    stopwatches: StopwatchBank,
    pending_mark: Option<f64>,
    selected: Option<MeasurementId>,
    current_cycle: u32,
    auto_counter: u32,
}

impl<C: ClockAdapter> StudySession<C> {
    /// Creates a session with an empty store.
    pub fn new(clock: C) -> Self {
        Self::with_measurements(clock, Vec::new())
    }

    /// Creates a session over an existing measurement sequence.
    pub fn with_measurements(clock: C, measurements: Vec<Measurement>) -> Self {
        Self {
            clock,
            store: SegmentStore::from_measurements(measurements),
            stopwatches: StopwatchBank::new(),
            pending_mark: None,
            selected: None,
            current_cycle: 1,
            auto_counter: 1,
        }
    }

    /// The clock handle, for transport commands from the host.
    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Read access to the clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Current measurement snapshot.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        self.store.measurements()
    }

    /// Replaces the whole collection (e.g. after a host-side load).
    pub fn replace_all(&mut self, measurements: Vec<Measurement>) {
        self.store.replace_all(measurements);
    }

    /// Removes a measurement and discards its running stopwatches.
    pub fn remove(&mut self, id: &MeasurementId) -> bool {
        self.stopwatches.clear_measurement(id);
        self.store.remove(id)
    }

    /// Sets or clears the explicit selection.
    pub fn select(&mut self, id: Option<MeasurementId>) {
        self.selected = id;
    }

    /// The measurement under the playhead, if any.
    #[must_use]
    pub fn active_measurement(&self) -> Option<&Measurement> {
        self.store.active_at(self.clock.snapshot().current_time)
    }

    /// Resolves the segment a categorize command applies to: the element
    /// active at the playhead wins over the explicit selection.
    #[must_use]
    pub fn effective_selection(&self) -> Option<MeasurementId> {
        self.active_measurement()
            .map(|m| m.id.clone())
            .or_else(|| self.selected.clone())
    }

    // ========== Stopwatches ==========

    /// Toggles the stopwatch for `category` on the effective selection.
    ///
    /// Starting while the clock is paused resumes playback — accumulation
    /// is only defined while the clock advances — so callers must treat
    /// this as potentially mutating the clock, not just the store.
    pub fn quick_categorize(
        &mut self,
        category: SubCategory,
    ) -> Result<ToggleOutcome, StopwatchError> {
        let id = self
            .effective_selection()
            .ok_or(StopwatchError::NoActiveSegment)?;
        let snap = self.clock.snapshot();

        if self.stopwatches.is_running(&id, category) {
            let elapsed = self
                .stopwatches
                .stop(&id, category, snap.current_time)
                .unwrap_or(0.0);
            let updated =
                stopwatch::apply_elapsed(self.store.measurements(), &id, category, elapsed);
            self.store.replace_all(updated);
            Ok(ToggleOutcome::Stopped { elapsed })
        } else {
            if !snap.is_playing {
                self.clock.play();
            }
            self.stopwatches.start(&id, category, snap.current_time);
            Ok(ToggleOutcome::Started)
        }
    }

    /// True if the stopwatch for `category` is running on the measurement.
    #[must_use]
    pub fn stopwatch_running(&self, id: &MeasurementId, category: SubCategory) -> bool {
        self.stopwatches.is_running(id, category)
    }

    // ========== Two-step marking ==========

    /// Records the pending start for a new element: the frontier of the
    /// existing measurements, or 0 on an empty timeline.
    pub fn mark_start(&mut self) -> f64 {
        let start = self.store.latest_end_time().unwrap_or(0.0);
        self.pending_mark = Some(start);
        tracing::debug!(start, "measurement started");
        start
    }

    /// The pending mark-start time, if one is armed.
    #[must_use]
    pub const fn pending_mark(&self) -> Option<f64> {
        self.pending_mark
    }

    /// Commits the pending mark at the current clock position.
    ///
    /// Returns `None` without mutating anything when no mark is pending or
    /// the name is blank. The end time is nudged past the start when the
    /// playhead has not moved beyond it. The advisory report for the new
    /// element is returned alongside it.
    pub fn mark_end(
        &mut self,
        name: &str,
        category: Category,
        therblig: Option<Therblig>,
    ) -> Option<(Measurement, Report)> {
        let start = self.pending_mark?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let end = editor::mark_end_time(start, self.clock.snapshot().current_time);
        let candidate = MeasurementDraft {
            element_name: Some(name.to_string()),
            category: Some(category),
            therblig,
            cycle: Some(self.current_cycle),
            ..MeasurementDraft::new(start, end)
        }
        .build();

        let report = validate::check(&candidate, self.store.measurements());
        let mut updated = self.store.snapshot();
        updated.push(candidate.clone());
        self.store.replace_all(updated);
        self.pending_mark = None;
        Some((candidate, report))
    }

    /// Discards the pending mark without touching the store.
    pub fn cancel_mark(&mut self) {
        self.pending_mark = None;
    }

    // ========== Auto-append ==========

    /// Appends a segment contiguous with the frontier, ending at the click.
    pub fn auto_append(&mut self, click_time: f64) -> Measurement {
        let duration = self.clock.snapshot().duration;
        let (start, end) =
            editor::auto_append_interval(self.store.measurements(), click_time, duration);

        let draft = MeasurementDraft {
            element_name: Some(format!("Element {}", self.auto_counter)),
            category: Some(Category::ValueAdded),
            rating: Some(100),
            cycle: Some(self.current_cycle),
            ..MeasurementDraft::new(start, end)
        };
        self.auto_counter += 1;
        self.store.add(draft)
    }

    // ========== Editing ==========

    /// Splits a measurement at `cut_time` and commits the result.
    pub fn split_at(&mut self, id: &MeasurementId, cut_time: f64) -> Result<(), SplitError> {
        let updated = editor::split(self.store.measurements(), id, cut_time)?;
        self.store.replace_all(updated);
        Ok(())
    }

    /// Commits a drag gesture against the latest snapshot.
    ///
    /// The gesture carries the interval captured at mouse-down; applying it
    /// here, against whatever the store holds now, is what makes a drag
    /// commit safe to interleave with clock-driven stopwatch stops.
    pub fn commit_drag(
        &mut self,
        gesture: &DragGesture,
        geometry: TrackGeometry,
        current_px: f64,
    ) {
        let updated = gesture.apply(geometry, current_px, self.store.measurements());
        self.store.replace_all(updated);
    }

    /// Applies an explicit field edit after validation.
    ///
    /// The duration is recomputed from the edited interval before the rules
    /// run. On rejection the store is untouched.
    pub fn apply_edit(&mut self, edited: &Measurement) -> Result<Vec<Warning>, EditError> {
        let normalized = edited.with_interval(edited.start_time, edited.end_time);
        let warnings = validate::check_edit(&normalized)?;

        let updated = self
            .store
            .measurements()
            .iter()
            .map(|m| {
                if m.id == normalized.id {
                    normalized.clone()
                } else {
                    m.clone()
                }
            })
            .collect();
        self.store.replace_all(updated);
        Ok(warnings)
    }

    // ========== Cycles ==========

    /// The cycle new measurements are tagged with.
    #[must_use]
    pub const fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    /// Advances to the next cycle.
    pub const fn next_cycle(&mut self) {
        self.current_cycle += 1;
    }

    /// Steps back one cycle, never below 1.
    pub const fn previous_cycle(&mut self) {
        if self.current_cycle > 1 {
            self.current_cycle -= 1;
        }
    }
}
