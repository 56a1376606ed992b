//! Check a project's measurements against the validation rules.

use std::io::Write;

use anyhow::Result;
use ms_core::Measurement;
use ms_core::validate::{self, Severity};

/// Runs every measurement through the hard and soft rules and prints the
/// findings. Hard violations come first; the command itself still exits
/// successfully, since the rules are diagnostics over data that already
/// exists.
pub fn run<W: Write>(writer: &mut W, measurements: &[Measurement]) -> Result<()> {
    let mut findings = 0usize;

    for m in measurements {
        match validate::check_edit(m) {
            Err(err) => {
                findings += 1;
                writeln!(writer, "error [{}] {}: {err}", m.id, m.element_name)?;
            }
            Ok(warnings) => {
                for warning in warnings {
                    findings += 1;
                    writeln!(
                        writer,
                        "{} [{}] {}: {}",
                        severity_label(warning.severity),
                        m.id,
                        m.element_name,
                        warning.message
                    )?;
                }
            }
        }

        let report = validate::check(m, measurements);
        for warning in report.warnings {
            // Duration findings were already covered by check_edit.
            if warning.kind == validate::WarningKind::Duplicate {
                findings += 1;
                writeln!(
                    writer,
                    "{} [{}] {}: {}",
                    severity_label(warning.severity),
                    m.id,
                    m.element_name,
                    warning.message
                )?;
            }
        }
        for suggestion in report.suggestions {
            writeln!(writer, "hint  [{}] {}: {}", m.id, m.element_name, suggestion.reason)?;
        }
    }

    if findings == 0 {
        writeln!(writer, "{} measurements checked, no issues found.", measurements.len())?;
    } else {
        writeln!(
            writer,
            "{} measurements checked, {findings} finding(s).",
            measurements.len()
        )?;
    }
    Ok(())
}

const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info ",
        Severity::Warning => "warn ",
    }
}
