//! Fixed-width history windows for rendering.

use crate::model::TestResult;

/// One position in a rendered history column: a real run, or a placeholder
/// where no data exists. Computed per render, never persisted.
#[derive(Debug, Clone, Copy)]
pub enum HistorySlot<'a> {
    Run(&'a TestResult),
    NoData,
}

/// Number of placeholder slots needed to pad `actual` results to a window of
/// `depth`. A negative depth means "no fixed window, show what exists" and
/// short-circuits to zero.
pub fn missing_slots(depth: i32, actual: usize) -> usize {
    if depth < 0 {
        return 0;
    }
    (depth as usize).saturating_sub(actual)
}

/// Lay out a history column: real results (most recent first, truncated to
/// `depth` when bounded) followed by placeholders, so the column is always
/// exactly `depth` wide, or exactly `results.len()` when `depth` is negative.
pub fn window(results: &[TestResult], depth: i32) -> Vec<HistorySlot<'_>> {
    let shown = if depth < 0 {
        results
    } else {
        &results[..results.len().min(depth as usize)]
    };

    let mut slots: Vec<HistorySlot<'_>> = shown.iter().map(HistorySlot::Run).collect();
    slots.extend((0..missing_slots(depth, shown.len())).map(|_| HistorySlot::NoData));
    slots
}
