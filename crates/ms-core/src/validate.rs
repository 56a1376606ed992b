//! Validation rules for explicit measurement edits.
//!
//! Hard rules reject the edit outright and leave the prior snapshot
//! untouched; soft rules produce advisory warnings the host surfaces to the
//! analyst. Stopwatch accumulation is deliberately not checked here — the
//! breakdown sum is only enforced when the analyst edits fields directly.

use thiserror::Error;

use crate::measurement::Measurement;
use crate::suggest;

/// Floating-point slack allowed when the breakdown sum exceeds the duration.
pub const BREAKDOWN_TOLERANCE: f64 = 0.01;

/// Under-allocation beyond this gap (seconds) draws a warning.
pub const UNDER_ALLOCATION_SLACK: f64 = 0.05;

/// Durations below this are flagged as likely mis-clicks.
pub const MIN_SANE_DURATION: f64 = 0.1;

/// Durations above this are flagged as candidates for splitting.
pub const MAX_SANE_DURATION: f64 = 60.0;

/// Hard rejections for an explicit edit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    /// Start/end are non-finite, negative, or inverted.
    #[error("start time must be a non-negative number less than the end time (got {start_time}..{end_time})")]
    InvalidInterval { start_time: f64, end_time: f64 },

    /// The sub-duration breakdown exceeds the element duration.
    #[error("breakdown sum {sum:.2}s exceeds element duration {duration:.2}s")]
    OverAllocatedBreakdown { sum: f64, duration: f64 },
}

/// Advisory severity, mirroring how findings are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// What an advisory finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    Duplicate,
    ShortDuration,
    LongDuration,
    UnderAllocated,
}

/// A non-blocking finding about a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
}

/// A non-binding improvement hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub value: String,
    pub reason: String,
}

/// Advisory report for a candidate measurement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub warnings: Vec<Warning>,
    pub suggestions: Vec<Suggestion>,
}

/// Checks an explicitly edited measurement against the hard rules and
/// returns the soft warnings that apply.
///
/// The caller commits the edit only on `Ok`; the returned warnings are
/// advisory and do not block.
pub fn check_edit(measurement: &Measurement) -> Result<Vec<Warning>, EditError> {
    let (start, end) = (measurement.start_time, measurement.end_time);
    if !start.is_finite() || !end.is_finite() || start < 0.0 || end < 0.0 || start >= end {
        return Err(EditError::InvalidInterval {
            start_time: start,
            end_time: end,
        });
    }

    let duration = end - start;
    let sum = measurement.breakdown_total();
    if sum > duration + BREAKDOWN_TOLERANCE {
        return Err(EditError::OverAllocatedBreakdown { sum, duration });
    }

    let mut warnings = duration_warnings(duration);

    // Partially categorized elements are tolerated; just flag the gap.
    if sum > 0.0 && sum < duration && duration - sum > UNDER_ALLOCATION_SLACK {
        tracing::warn!(
            sum,
            duration,
            id = %measurement.id,
            "breakdown sum does not cover the element duration"
        );
        warnings.push(Warning {
            kind: WarningKind::UnderAllocated,
            severity: Severity::Info,
            message: format!(
                "Breakdown sum ({sum:.2}s) covers less than the duration ({duration:.2}s)"
            ),
        });
    }

    Ok(warnings)
}

/// Full advisory report: duration sanity, duplicate detection, and
/// therblig suggestion. Called after a candidate is built, before commit.
#[must_use]
pub fn check(measurement: &Measurement, existing: &[Measurement]) -> Report {
    let mut report = Report {
        warnings: duration_warnings(measurement.duration),
        suggestions: Vec::new(),
    };

    let duplicates = suggest::detect_duplicates(measurement, existing);
    if let Some(first) = duplicates.first() {
        report.warnings.push(Warning {
            kind: WarningKind::Duplicate,
            severity: Severity::Warning,
            message: format!("Similar measurement found: \"{}\"", first.element_name),
        });
    }

    if measurement.therblig.is_none() {
        if let Some(therblig) = suggest::suggest_therblig(&measurement.element_name) {
            report.suggestions.push(Suggestion {
                value: therblig.code().to_string(),
                reason: format!("Suggested therblig: {} ({})", therblig.code(), therblig.name()),
            });
        }
    }

    report
}

fn duration_warnings(duration: f64) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if duration < MIN_SANE_DURATION {
        warnings.push(Warning {
            kind: WarningKind::ShortDuration,
            severity: Severity::Info,
            message: format!("Duration is very short ({duration:.2}s). Is this correct?"),
        });
    }
    if duration > MAX_SANE_DURATION {
        warnings.push(Warning {
            kind: WarningKind::LongDuration,
            severity: Severity::Warning,
            message: format!(
                "Duration is very long ({duration:.1}s). Consider splitting into smaller elements."
            ),
        });
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{MeasurementDraft, SubCategory};

    fn sample(start: f64, end: f64) -> Measurement {
        MeasurementDraft::new(start, end).build()
    }

    fn named(name: &str, start: f64, end: f64) -> Measurement {
        MeasurementDraft {
            element_name: Some(name.to_string()),
            ..MeasurementDraft::new(start, end)
        }
        .build()
    }

    #[test]
    fn rejects_inverted_interval() {
        let m = sample(5.0, 5.0);
        assert!(matches!(
            check_edit(&m),
            Err(EditError::InvalidInterval { .. })
        ));

        let m = sample(6.0, 2.0);
        assert!(matches!(
            check_edit(&m),
            Err(EditError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn rejects_negative_and_non_finite_times() {
        let m = sample(-1.0, 3.0);
        assert!(check_edit(&m).is_err());

        let m = sample(f64::NAN, 3.0);
        assert!(check_edit(&m).is_err());

        let m = sample(0.0, f64::INFINITY);
        assert!(check_edit(&m).is_err());
    }

    #[test]
    fn rejects_over_allocated_breakdown() {
        // duration 5, manual 3 + auto 3 = 6 > 5.01
        let mut m = sample(0.0, 5.0);
        m.add_sub_time(SubCategory::Manual, 3.0);
        m.add_sub_time(SubCategory::Auto, 3.0);

        let err = check_edit(&m).unwrap_err();
        assert!(matches!(err, EditError::OverAllocatedBreakdown { .. }));
    }

    #[test]
    fn tolerates_breakdown_within_epsilon() {
        let mut m = sample(0.0, 5.0);
        m.add_sub_time(SubCategory::Manual, 5.005);
        assert!(check_edit(&m).is_ok());
    }

    #[test]
    fn under_allocation_warns_but_passes() {
        let mut m = sample(0.0, 5.0);
        m.add_sub_time(SubCategory::Manual, 2.0);

        let warnings = check_edit(&m).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.kind == WarningKind::UnderAllocated));
    }

    #[test]
    fn zero_breakdown_does_not_warn_under_allocation() {
        let m = sample(0.0, 5.0);
        let warnings = check_edit(&m).unwrap();
        assert!(!warnings
            .iter()
            .any(|w| w.kind == WarningKind::UnderAllocated));
    }

    #[test]
    fn short_duration_is_flagged() {
        let m = sample(1.0, 1.05);
        let warnings = check_edit(&m).unwrap();
        assert!(warnings.iter().any(|w| w.kind == WarningKind::ShortDuration));
    }

    #[test]
    fn long_duration_is_flagged() {
        let m = sample(0.0, 75.0);
        let report = check(&m, &[]);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::LongDuration));
    }

    #[test]
    fn duplicate_detection_surfaces_a_warning() {
        let candidate = named("Pick part", 0.0, 2.0);
        let existing = vec![named("Pick part", 10.0, 12.1)];

        let report = check(&candidate, &existing);
        assert!(report.warnings.iter().any(|w| w.kind == WarningKind::Duplicate));
    }

    #[test]
    fn therblig_suggested_when_missing() {
        let candidate = named("Inspect housing", 0.0, 2.0);
        let report = check(&candidate, &[]);
        assert!(report.suggestions.iter().any(|s| s.value == "I"));
    }

    #[test]
    fn no_therblig_suggestion_when_already_set() {
        let mut candidate = named("Inspect housing", 0.0, 2.0);
        candidate.therblig = Some(crate::types::Therblig::Inspect);
        let report = check(&candidate, &[]);
        assert!(report.suggestions.is_empty());
    }
}
