//! Core timeline and measurement engine for time-and-motion study.
//!
//! This crate contains the fundamental types and logic for:
//! - Segment store: the ordered, replace-whole-collection measurement set
//! - Interval editing: pixel/time mapping, drag, split, auto-append, marks
//! - Stopwatch accumulation: per-segment sub-category timers on the clock
//! - Standard-time analytics: rating and allowance adjustments
//! - Validation and cycle aggregation
//!
//! The media clock is a collaborator behind the [`ClockAdapter`] trait; the
//! engine never decodes or persists anything itself.

pub mod clock;
pub mod cycle;
pub mod editor;
pub mod measurement;
pub mod standard_time;
pub mod stopwatch;
pub mod store;
pub mod suggest;
pub mod validate;

mod session;
mod types;

pub use clock::{ClockAdapter, ClockSnapshot, MediaClock, NOMINAL_FPS};
pub use measurement::{Measurement, MeasurementDraft, SubCategory};
pub use session::{StudySession, ToggleOutcome};
pub use standard_time::AllowanceConfig;
pub use store::SegmentStore;
pub use types::{Category, MeasurementId, Therblig, ValidationError};
