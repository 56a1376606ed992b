//! Scripted annotation session against the offline clock.
//!
//! Exercises the whole engine surface end to end without a media file:
//! mark start/end, auto-append, stopwatch accumulation during playback,
//! split, and cycle tagging. Useful as a smoke test and as a worked
//! example of the host/engine contract.

use std::io::Write;

use anyhow::Result;
use ms_core::{Category, ClockAdapter, MediaClock, StudySession, SubCategory};

pub fn run<W: Write>(writer: &mut W, duration: f64) -> Result<()> {
    let mut session = StudySession::new(MediaClock::new(duration));

    writeln!(writer, "Simulating a study over {duration:.0}s of media")?;
    writeln!(writer)?;

    // Two-step mark: the playhead advances while the element runs.
    session.mark_start();
    session.clock_mut().play();
    session.clock_mut().advance(3.2);
    let (reach, report) = session
        .mark_end("Reach for part", Category::NonValueAdded, None)
        .expect("mark was armed");
    writeln!(
        writer,
        "marked   {:<18} [{:.2}, {:.2}]",
        reach.element_name, reach.start_time, reach.end_time
    )?;
    for suggestion in report.suggestions {
        writeln!(writer, "         hint: {}", suggestion.reason)?;
    }

    // Auto-append from the frontier to the playhead.
    session.clock_mut().advance(2.8);
    let click_time = session.clock().snapshot().current_time;
    let appended = session.auto_append(click_time);
    writeln!(
        writer,
        "appended {:<18} [{:.2}, {:.2}]",
        appended.element_name, appended.start_time, appended.end_time
    )?;

    // Stopwatch accumulation on the appended element while playback runs.
    session.select(Some(appended.id.clone()));
    session.quick_categorize(SubCategory::Manual)?;
    session.clock_mut().advance(1.5);
    session.quick_categorize(SubCategory::Manual)?;
    writeln!(
        writer,
        "manual stopwatch accumulated {:.2}s on {}",
        session
            .measurements()
            .iter()
            .find(|m| m.id == appended.id)
            .map_or(0.0, |m| m.manual_time),
        appended.element_name
    )?;

    // Second cycle: mark a longer element, then split it at the playhead.
    session.next_cycle();
    session.mark_start();
    session.clock_mut().advance(4.0);
    let (inspect, _) = session
        .mark_end("Inspect housing", Category::ValueAdded, None)
        .expect("mark was armed");
    writeln!(
        writer,
        "marked   {:<18} [{:.2}, {:.2}] (cycle {})",
        inspect.element_name,
        inspect.start_time,
        inspect.end_time,
        inspect.cycle
    )?;

    let cut = f64::midpoint(inspect.start_time, inspect.end_time);
    match session.split_at(&inspect.id, cut) {
        Ok(()) => writeln!(writer, "split    {} at {:.2}s", inspect.element_name, cut)?,
        Err(err) => writeln!(writer, "split rejected: {err}")?,
    }

    // Final timeline.
    writeln!(writer)?;
    writeln!(
        writer,
        "{:<22} {:<16} {:>8} {:>8} {:>9} {:>6}",
        "Element", "Category", "Start", "End", "Manual", "Cycle"
    )?;
    for m in session.measurements() {
        writeln!(
            writer,
            "{:<22} {:<16} {:>8.2} {:>8.2} {:>9.2} {:>6}",
            m.element_name, m.category, m.start_time, m.end_time, m.manual_time, m.cycle
        )?;
    }

    if let Some(summary) = ms_core::cycle::summarize(session.measurements()) {
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
