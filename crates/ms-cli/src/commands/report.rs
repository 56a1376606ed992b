//! Standard-time report: per-element averages, rating, allowances.
//!
//! Mirrors the classic time-study worksheet: repetitions of the same
//! element are grouped by name, averaged, adjusted by the element's
//! performance rating, and inflated by the process-wide allowances.

use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use ms_core::standard_time::{self, AllowanceConfig};
use ms_core::{Category, Measurement, cycle};
use serde::Serialize;

/// One row of the standard-time table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub element: String,
    pub category: Category,
    pub count: usize,
    pub avg_time: f64,
    pub rating: i32,
    pub normal_time: f64,
    pub standard_time: f64,
}

/// Computed report data, serialized as-is for `--json`.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub allowances: AllowanceConfig,
    pub rows: Vec<ReportRow>,
    pub total_standard_time: f64,
}

/// Builds the report rows from a measurement snapshot.
///
/// The rating for a grouped element is the one on its most recent
/// repetition (last in snapshot order); unrated elements report at normal
/// pace.
#[must_use]
pub fn build(measurements: &[Measurement], allowances: &AllowanceConfig) -> ReportData {
    let mut last_rating: HashMap<&str, i32> = HashMap::new();
    for m in measurements {
        last_rating.insert(m.element_name.as_str(), m.rating);
    }

    let rows: Vec<ReportRow> = cycle::element_stats(measurements)
        .into_iter()
        .map(|stats| {
            let rating = standard_time::effective_rating(
                last_rating.get(stats.name.as_str()).copied().unwrap_or(0),
            );
            ReportRow {
                normal_time: standard_time::normal_time(stats.avg, rating),
                standard_time: standard_time::standard_time(stats.avg, rating, allowances),
                element: stats.name,
                category: stats.category,
                count: stats.count,
                avg_time: stats.avg,
                rating,
            }
        })
        .collect();

    let total_standard_time = rows.iter().map(|r| r.standard_time).sum();
    ReportData {
        generated_at: Utc::now(),
        allowances: *allowances,
        rows,
        total_standard_time,
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    measurements: &[Measurement],
    allowances: &AllowanceConfig,
    json: bool,
) -> Result<()> {
    let data = build(measurements, allowances);

    if json {
        serde_json::to_writer_pretty(&mut *writer, &data)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Standard time report — generated {}",
        data.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(
        writer,
        "Allowances: personal {}% + fatigue {}% + delay {}% = {}%",
        allowances.personal,
        allowances.fatigue,
        allowances.delay,
        allowances.total()
    )?;
    writeln!(writer)?;

    if data.rows.is_empty() {
        writeln!(writer, "No measurements recorded.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<28} {:<16} {:>3} {:>8} {:>7} {:>10} {:>8}",
        "Element", "Category", "n", "Avg(s)", "Rating", "Normal(s)", "Std(s)"
    )?;
    for row in &data.rows {
        writeln!(
            writer,
            "{:<28} {:<16} {:>3} {:>8.2} {:>6}% {:>10.2} {:>8.2}",
            row.element,
            row.category,
            row.count,
            row.avg_time,
            row.rating,
            row.normal_time,
            row.standard_time,
        )?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Total standard time: {:.2}s",
        data.total_standard_time
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::MeasurementDraft;

    fn rated(name: &str, start: f64, end: f64, rating: i32) -> Measurement {
        MeasurementDraft {
            element_name: Some(name.to_string()),
            rating: Some(rating),
            ..MeasurementDraft::new(start, end)
        }
        .build()
    }

    #[test]
    fn build_matches_reference_standard_time() {
        // duration 10, rating 120, allowances {5, 4, 2}: normal 12.0, std 13.32
        let measurements = vec![rated("Press", 0.0, 10.0, 120)];
        let data = build(&measurements, &AllowanceConfig::default());

        assert_eq!(data.rows.len(), 1);
        let row = &data.rows[0];
        assert!((row.normal_time - 12.0).abs() < 1e-9);
        assert!((row.standard_time - 13.32).abs() < 1e-9);
        assert!((data.total_standard_time - 13.32).abs() < 1e-9);
    }

    #[test]
    fn build_averages_repetitions_and_uses_last_rating() {
        let measurements = vec![
            rated("Pick", 0.0, 2.0, 100),
            rated("Pick", 2.0, 6.0, 110),
        ];
        let data = build(&measurements, &AllowanceConfig::default());

        let row = &data.rows[0];
        assert_eq!(row.count, 2);
        assert!((row.avg_time - 3.0).abs() < 1e-9);
        assert_eq!(row.rating, 110);
    }

    #[test]
    fn unrated_elements_report_at_normal_pace() {
        let measurements = vec![rated("Pick", 0.0, 4.0, 0)];
        let data = build(&measurements, &AllowanceConfig::default());
        assert_eq!(data.rows[0].rating, 100);
        assert!((data.rows[0].normal_time - 4.0).abs() < 1e-9);
    }

    #[test]
    fn table_output_lists_rows_and_total() {
        let measurements = vec![rated("Press", 0.0, 10.0, 120)];
        let mut out = Vec::new();
        run(&mut out, &measurements, &AllowanceConfig::default(), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Press"));
        assert!(text.contains("Total standard time: 13.32s"));
    }

    #[test]
    fn json_output_is_parseable() {
        let measurements = vec![rated("Press", 0.0, 10.0, 120)];
        let mut out = Vec::new();
        run(&mut out, &measurements, &AllowanceConfig::default(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"][0]["element"], "Press");
        assert!((value["total_standard_time"].as_f64().unwrap() - 13.32).abs() < 1e-9);
    }

    #[test]
    fn empty_project_reports_cleanly() {
        let mut out = Vec::new();
        run(&mut out, &[], &AllowanceConfig::default(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No measurements recorded."));
    }
}
