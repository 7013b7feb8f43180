//! Dashboard summary statistics.

use super::student::StudentRecord;

/// Share of the roster reported as present today, in percent.
///
/// Placeholder heuristic: not derived from recorded attendance.
pub const PRESENT_TODAY_PLACEHOLDER_PCT: usize = 85;

/// Average attendance shown on the dashboard.
///
/// Placeholder display value: not computed from `attendance` counters.
pub const AVERAGE_ATTENDANCE_PLACEHOLDER: &str = "87%";

/// Quick stats shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: usize,
    pub present_today: usize,
    pub average_attendance_pct: &'static str,
}

impl SummaryStats {
    /// Two-digit zero-padded display value, e.g. "07".
    pub fn padded(value: usize) -> String {
        format!("{value:02}")
    }
}

/// Compute summary statistics for a roster.
pub fn compute_summary_stats(roster: &[StudentRecord]) -> SummaryStats {
    let total = roster.len();
    SummaryStats {
        total,
        // floor(total * 0.85)
        present_today: total * PRESENT_TODAY_PLACEHOLDER_PCT / 100,
        average_attendance_pct: AVERAGE_ATTENDANCE_PLACEHOLDER,
    }
}
