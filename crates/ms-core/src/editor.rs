//! Direct-manipulation editing: pixel/time mapping, drag gestures, split,
//! auto-append, and two-step start/end marking.
//!
//! Every operation here is a pure function from (snapshot, input) to a new
//! snapshot; nothing is durable until the caller commits the result with
//! `replace_all`. Drag previews recompute from the values captured at
//! gesture start, never from intermediate state, so a gesture is idempotent
//! over its move events.

use thiserror::Error;

use crate::measurement::Measurement;
use crate::types::MeasurementId;

/// Minimum duration a resize may leave behind, in seconds.
pub const MIN_DRAG_DURATION: f64 = 0.1;

/// Minimum duration of an auto-appended segment when the click lands on or
/// before the frontier.
pub const AUTO_APPEND_MIN_DURATION: f64 = 0.5;

/// Minimum duration of a segment committed through mark-start/mark-end.
pub const MARK_MIN_DURATION: f64 = 0.01;

/// Errors from the split operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    /// No measurement with the given ID exists in the snapshot.
    #[error("no measurement with id {id}")]
    NotFound { id: MeasurementId },

    /// The cut point does not fall strictly inside the measurement.
    #[error("cut time {cut_time:.2}s must be strictly inside ({start_time:.2}s, {end_time:.2}s)")]
    OutOfBounds {
        cut_time: f64,
        start_time: f64,
        end_time: f64,
    },
}

/// Maps a horizontal pixel track of `width_px` onto the media `[0, duration]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub width_px: f64,
    pub duration: f64,
}

impl TrackGeometry {
    /// Creates a mapping for a track of the given pixel width and media duration.
    #[must_use]
    pub const fn new(width_px: f64, duration: f64) -> Self {
        Self { width_px, duration }
    }

    /// Converts an absolute track position in pixels to a time in seconds.
    #[must_use]
    pub fn time_at(&self, px: f64) -> f64 {
        if self.width_px <= 0.0 {
            return 0.0;
        }
        (px / self.width_px) * self.duration
    }

    /// Converts a pixel delta to a time delta.
    #[must_use]
    pub fn delta_time(&self, delta_px: f64) -> f64 {
        self.time_at(delta_px)
    }
}

/// Which edges of the segment a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Shift the whole segment, length preserved.
    Move,
    /// Drag the start edge.
    ResizeLeft,
    /// Drag the end edge.
    ResizeRight,
}

/// State captured when a drag gesture begins.
///
/// The original interval and the anchor pixel are frozen at mouse-down;
/// every move event recomputes the preview from these, so stale
/// intermediate previews can never compound.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub id: MeasurementId,
    pub mode: DragMode,
    pub anchor_px: f64,
    pub original_start: f64,
    pub original_end: f64,
}

impl DragGesture {
    /// Begins a gesture on the given measurement at the given pointer position.
    #[must_use]
    pub fn begin(measurement: &Measurement, mode: DragMode, anchor_px: f64) -> Self {
        Self {
            id: measurement.id.clone(),
            mode,
            anchor_px,
            original_start: measurement.start_time,
            original_end: measurement.end_time,
        }
    }

    /// Computes the previewed interval for the current pointer position.
    ///
    /// Results are clamped to `[0, duration]`. Moves keep the segment length
    /// by clamping the shift itself; resizes that would drop below
    /// [`MIN_DRAG_DURATION`] hold the floor against the opposite edge.
    #[must_use]
    pub fn preview(&self, geometry: TrackGeometry, current_px: f64) -> (f64, f64) {
        let delta = geometry.delta_time(current_px - self.anchor_px);
        let duration = geometry.duration;

        match self.mode {
            DragMode::Move => {
                let shift = delta.clamp(-self.original_start, duration - self.original_end);
                (self.original_start + shift, self.original_end + shift)
            }
            DragMode::ResizeLeft => {
                let mut start = (self.original_start + delta).max(0.0);
                let end = self.original_end.min(duration);
                if end - start < MIN_DRAG_DURATION {
                    start = end - MIN_DRAG_DURATION;
                }
                (start, end)
            }
            DragMode::ResizeRight => {
                let start = self.original_start.max(0.0);
                let mut end = (self.original_end + delta).min(duration);
                if end - start < MIN_DRAG_DURATION {
                    end = start + MIN_DRAG_DURATION;
                }
                (start, end)
            }
        }
    }

    /// Applies the preview at `current_px` to a snapshot, returning the
    /// replacement collection. Only the dragged measurement changes; order
    /// is preserved.
    #[must_use]
    pub fn apply(
        &self,
        geometry: TrackGeometry,
        current_px: f64,
        snapshot: &[Measurement],
    ) -> Vec<Measurement> {
        let (start, end) = self.preview(geometry, current_px);
        snapshot
            .iter()
            .map(|m| {
                if m.id == self.id {
                    m.with_interval(start, end)
                } else {
                    m.clone()
                }
            })
            .collect()
    }
}

/// Splits a measurement in two at `cut_time`.
///
/// Both halves inherit every field of the original except the interval, the
/// ID (fresh for each), and the name, which gets " (1)" / " (2)" suffixes.
/// The returned collection is sorted by start time.
pub fn split(
    snapshot: &[Measurement],
    id: &MeasurementId,
    cut_time: f64,
) -> Result<Vec<Measurement>, SplitError> {
    let original = snapshot
        .iter()
        .find(|m| &m.id == id)
        .ok_or_else(|| SplitError::NotFound { id: id.clone() })?;

    if cut_time <= original.start_time || cut_time >= original.end_time {
        return Err(SplitError::OutOfBounds {
            cut_time,
            start_time: original.start_time,
            end_time: original.end_time,
        });
    }

    let mut first = original.with_interval(original.start_time, cut_time);
    first.id = MeasurementId::generate();
    first.element_name = format!("{} (1)", original.element_name);

    let mut second = original.with_interval(cut_time, original.end_time);
    second.id = MeasurementId::generate();
    second.element_name = format!("{} (2)", original.element_name);

    tracing::debug!(
        id = %id,
        cut = cut_time,
        "measurement split into [{:.2}, {:.2}] and [{:.2}, {:.2}]",
        first.start_time,
        first.end_time,
        second.start_time,
        second.end_time,
    );

    let mut updated: Vec<Measurement> = snapshot
        .iter()
        .filter(|m| &m.id != id)
        .cloned()
        .chain([first, second])
        .collect();
    updated.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    Ok(updated)
}

/// Computes the interval for an auto-appended segment.
///
/// Start is the frontier (largest end time, or 0 when the snapshot is
/// empty); end is the click time, raised to `start + 0.5` when the click
/// lands on or before the frontier, and clamped to the media duration.
/// Used consistently this yields contiguous coverage from t=0, but it never
/// retroactively fixes gaps opened by other edit paths.
#[must_use]
pub fn auto_append_interval(
    snapshot: &[Measurement],
    click_time: f64,
    media_duration: f64,
) -> (f64, f64) {
    let start = snapshot
        .iter()
        .map(|m| m.end_time)
        .max_by(f64::total_cmp)
        .unwrap_or(0.0);

    let mut end = click_time;
    if end <= start {
        end = start + AUTO_APPEND_MIN_DURATION;
    }
    if end > media_duration {
        end = media_duration;
    }
    (start, end)
}

/// Computes the end time for a mark-end commit.
///
/// The clock position wins when it lies past the pending start; otherwise
/// the end is nudged to `start + 0.01` so the interval stays valid.
#[must_use]
pub fn mark_end_time(pending_start: f64, clock_time: f64) -> f64 {
    if clock_time > pending_start {
        clock_time
    } else {
        pending_start + MARK_MIN_DURATION
    }
}
