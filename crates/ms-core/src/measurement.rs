//! The Measurement entity: one timestamped, categorized work element.

use serde::{Deserialize, Serialize};

use crate::types::{Category, MeasurementId, Therblig};

/// Sub-duration categories accumulated by stopwatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCategory {
    Manual,
    Auto,
    Walk,
    Waiting,
}

impl SubCategory {
    /// All categories, in the order they appear on the controls.
    pub const ALL: [Self; 4] = [Self::Manual, Self::Auto, Self::Walk, Self::Waiting];

    /// Lowercase label used in messages and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::Walk => "walk",
            Self::Waiting => "waiting",
        }
    }
}

impl std::fmt::Display for SubCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single measured work element on the timeline.
///
/// `duration` is derived state: it must equal `end_time - start_time` after
/// every mutation. All interval edits go through [`Measurement::with_interval`]
/// so the recomputation cannot be forgotten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Unique identifier, assigned at creation, immutable.
    pub id: MeasurementId,

    /// Free-text label for the work element.
    pub element_name: String,

    /// Lean category of the element.
    pub category: Category,

    /// Optional method-classification code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therblig: Option<Therblig>,

    /// Interval start in seconds from the beginning of the recording.
    pub start_time: f64,

    /// Interval end in seconds.
    pub end_time: f64,

    /// Derived: `end_time - start_time`.
    pub duration: f64,

    /// Accumulated hands-on time in seconds.
    #[serde(default)]
    pub manual_time: f64,

    /// Accumulated machine time in seconds.
    #[serde(default)]
    pub auto_time: f64,

    /// Accumulated walking time in seconds.
    #[serde(default)]
    pub walk_time: f64,

    /// Accumulated waiting/loss time in seconds.
    #[serde(default)]
    pub waiting_time: f64,

    /// Performance rating percentage (100 = normal pace, 0 = unrated).
    #[serde(default)]
    pub rating: i32,

    /// Cycle index grouping repetitions of the same work sequence.
    #[serde(default = "default_cycle")]
    pub cycle: u32,
}

const fn default_cycle() -> u32 {
    1
}

impl Measurement {
    /// Returns a copy with the interval replaced and duration recomputed.
    #[must_use]
    pub fn with_interval(&self, start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            duration: end_time - start_time,
            ..self.clone()
        }
    }

    /// True if `t` falls inside the closed interval `[start_time, end_time]`.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_time && t <= self.end_time
    }

    /// Sum of the four accumulated sub-durations.
    #[must_use]
    pub fn breakdown_total(&self) -> f64 {
        self.manual_time + self.auto_time + self.walk_time + self.waiting_time
    }

    /// Reads one accumulated sub-duration.
    #[must_use]
    pub const fn sub_time(&self, category: SubCategory) -> f64 {
        match category {
            SubCategory::Manual => self.manual_time,
            SubCategory::Auto => self.auto_time,
            SubCategory::Walk => self.walk_time,
            SubCategory::Waiting => self.waiting_time,
        }
    }

    /// Adds elapsed time to one sub-duration, flooring the result at zero.
    pub fn add_sub_time(&mut self, category: SubCategory, delta: f64) {
        let slot = match category {
            SubCategory::Manual => &mut self.manual_time,
            SubCategory::Auto => &mut self.auto_time,
            SubCategory::Walk => &mut self.walk_time,
            SubCategory::Waiting => &mut self.waiting_time,
        };
        *slot = (*slot + delta).max(0.0);
    }
}

/// Partial measurement used when adding to the store.
///
/// Only the interval is required; everything else falls back to the same
/// defaults the add path has always used (unnamed, non value-added, unrated,
/// cycle 1).
#[derive(Debug, Clone, Default)]
pub struct MeasurementDraft {
    pub element_name: Option<String>,
    pub category: Option<Category>,
    pub therblig: Option<Therblig>,
    pub rating: Option<i32>,
    pub cycle: Option<u32>,
    pub start_time: f64,
    pub end_time: f64,
}

impl MeasurementDraft {
    /// Creates a draft spanning the given interval.
    #[must_use]
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            ..Self::default()
        }
    }

    /// Materializes the draft with a fresh ID and defaults filled in.
    #[must_use]
    pub fn build(self) -> Measurement {
        Measurement {
            id: MeasurementId::generate(),
            element_name: self
                .element_name
                .unwrap_or_else(|| "New Element".to_string()),
            category: self.category.unwrap_or_default(),
            therblig: self.therblig,
            start_time: self.start_time,
            end_time: self.end_time,
            duration: self.end_time - self.start_time,
            manual_time: 0.0,
            auto_time: 0.0,
            walk_time: 0.0,
            waiting_time: 0.0,
            rating: self.rating.unwrap_or(0),
            cycle: self.cycle.unwrap_or(1),
        }
    }
}
