//! Per-cycle totals and summary statistics.

use std::io::Write;

use anyhow::Result;
use ms_core::cycle::{self, CycleSummary};
use ms_core::Measurement;
use serde::Serialize;

/// One cycle's aggregate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CycleRow {
    pub cycle: u32,
    pub elements: usize,
    pub total_time: f64,
}

/// Computed cycle data, serialized as-is for `--json`.
#[derive(Debug, Serialize)]
pub struct CyclesData {
    pub rows: Vec<CycleRow>,
    pub summary: Option<CycleSummary>,
}

/// Builds per-cycle rows and the cross-cycle summary.
#[must_use]
pub fn build(measurements: &[Measurement]) -> CyclesData {
    let rows = cycle::cycle_totals(measurements)
        .into_iter()
        .map(|(cycle, total_time)| CycleRow {
            cycle,
            elements: cycle::filter_by_cycle(measurements, cycle).len(),
            total_time,
        })
        .collect();

    CyclesData {
        rows,
        summary: cycle::summarize(measurements),
    }
}

pub fn run<W: Write>(writer: &mut W, measurements: &[Measurement], json: bool) -> Result<()> {
    let data = build(measurements);

    if json {
        serde_json::to_writer_pretty(&mut *writer, &data)?;
        writeln!(writer)?;
        return Ok(());
    }

    if data.rows.is_empty() {
        writeln!(writer, "No measurements recorded.")?;
        return Ok(());
    }

    writeln!(writer, "{:<7} {:>9} {:>10}", "Cycle", "Elements", "Total(s)")?;
    for row in &data.rows {
        writeln!(
            writer,
            "{:<7} {:>9} {:>10.2}",
            row.cycle, row.elements, row.total_time
        )?;
    }

    if let Some(summary) = data.summary {
        writeln!(writer)?;
        writeln!(
            writer,
            "Cycles: {}  avg {:.2}s  min {:.2}s  max {:.2}s",
            summary.cycles,
            summary.avg_cycle_time,
            summary.min_cycle_time,
            summary.max_cycle_time
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::MeasurementDraft;

    fn in_cycle(cycle: u32, start: f64, end: f64) -> Measurement {
        MeasurementDraft {
            cycle: Some(cycle),
            ..MeasurementDraft::new(start, end)
        }
        .build()
    }

    #[test]
    fn build_aggregates_reference_figures() {
        let measurements = vec![
            in_cycle(1, 0.0, 2.0),
            in_cycle(1, 2.0, 5.0),
            in_cycle(2, 5.0, 15.0),
        ];
        let data = build(&measurements);

        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].elements, 2);
        assert!((data.rows[0].total_time - 5.0).abs() < 1e-9);

        let summary = data.summary.unwrap();
        assert!((summary.avg_cycle_time - 7.5).abs() < 1e-9);
        assert!((summary.min_cycle_time - 5.0).abs() < 1e-9);
        assert!((summary.max_cycle_time - 10.0).abs() < 1e-9);
    }

    #[test]
    fn table_output_includes_summary_line() {
        let measurements = vec![in_cycle(1, 0.0, 5.0), in_cycle(2, 5.0, 15.0)];
        let mut out = Vec::new();
        run(&mut out, &measurements, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("avg 7.50s"));
        assert!(text.contains("min 5.00s"));
        assert!(text.contains("max 10.00s"));
    }

    #[test]
    fn json_output_is_parseable() {
        let measurements = vec![in_cycle(1, 0.0, 5.0)];
        let mut out = Vec::new();
        run(&mut out, &measurements, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"][0]["cycle"], 1);
    }
}
