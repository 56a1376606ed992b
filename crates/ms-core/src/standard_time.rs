//! Standard-time analytics: rating and allowance adjustments.
//!
//! Pure functions only. Nothing here is cached on the entity; callers
//! recompute on every read so results always reflect the current rating and
//! allowance configuration. No rounding is applied; presentation layers
//! round for display.

use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;

/// Process-wide allowance percentages applied on top of normal time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceConfig {
    /// Rest breaks and personal needs, percent.
    pub personal: f64,
    /// Basic physical/mental fatigue, percent.
    pub fatigue: f64,
    /// Unavoidable process delays, percent.
    pub delay: f64,
}

impl Default for AllowanceConfig {
    fn default() -> Self {
        Self {
            personal: 5.0,
            fatigue: 4.0,
            delay: 2.0,
        }
    }
}

impl AllowanceConfig {
    /// Combined allowance percentage.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.personal + self.fatigue + self.delay
    }
}

/// Normal time: observed duration adjusted by the performance rating.
#[must_use]
pub fn normal_time(duration: f64, rating: i32) -> f64 {
    duration * f64::from(rating) / 100.0
}

/// Standard time: normal time inflated by the combined allowances.
#[must_use]
pub fn standard_time(duration: f64, rating: i32, allowances: &AllowanceConfig) -> f64 {
    normal_time(duration, rating) * (1.0 + allowances.total() / 100.0)
}

/// Normal and standard time for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardTimes {
    pub normal: f64,
    pub standard: f64,
}

/// Computes both figures for a measurement.
///
/// A rating of zero or below means "unrated"; those elements are reported
/// at normal pace (100) rather than collapsing to zero.
#[must_use]
pub fn for_measurement(measurement: &Measurement, allowances: &AllowanceConfig) -> StandardTimes {
    let rating = effective_rating(measurement.rating);
    StandardTimes {
        normal: normal_time(measurement.duration, rating),
        standard: standard_time(measurement.duration, rating, allowances),
    }
}

/// Maps unrated (≤ 0) to the normal-pace default of 100.
#[must_use]
pub const fn effective_rating(rating: i32) -> i32 {
    if rating <= 0 { 100 } else { rating }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeasurementDraft;

    #[test]
    fn normal_time_scales_by_rating() {
        assert!((normal_time(10.0, 120) - 12.0).abs() < 1e-9);
        assert!((normal_time(10.0, 100) - 10.0).abs() < 1e-9);
        assert!((normal_time(10.0, 50) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn standard_time_applies_default_allowances() {
        // duration 10, rating 120, allowances {5, 4, 2}:
        // normal = 12.0, standard = 12.0 * 1.11 = 13.32
        let allowances = AllowanceConfig::default();
        let standard = standard_time(10.0, 120, &allowances);
        assert!((standard - 13.32).abs() < 1e-9);
    }

    #[test]
    fn default_allowances_total_eleven_percent() {
        assert!((AllowanceConfig::default().total() - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn for_measurement_treats_unrated_as_normal_pace() {
        let m = MeasurementDraft::new(0.0, 8.0).build();
        assert_eq!(m.rating, 0);

        let times = for_measurement(&m, &AllowanceConfig::default());
        assert!((times.normal - 8.0).abs() < 1e-9);
        assert!((times.standard - 8.0 * 1.11).abs() < 1e-9);
    }

    #[test]
    fn for_measurement_uses_explicit_rating() {
        let m = MeasurementDraft {
            rating: Some(80),
            ..MeasurementDraft::new(0.0, 10.0)
        }
        .build();

        let times = for_measurement(&m, &AllowanceConfig::default());
        assert!((times.normal - 8.0).abs() < 1e-9);
    }

    #[test]
    fn allowance_config_serde_roundtrip() {
        let config = AllowanceConfig {
            personal: 6.0,
            fatigue: 5.5,
            delay: 1.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AllowanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn allowance_config_serde_fills_missing_fields() {
        let parsed: AllowanceConfig = serde_json::from_str(r#"{"personal": 7.0}"#).unwrap();
        assert!((parsed.personal - 7.0).abs() < f64::EPSILON);
        assert!((parsed.fatigue - 4.0).abs() < f64::EPSILON);
        assert!((parsed.delay - 2.0).abs() < f64::EPSILON);
    }
}
