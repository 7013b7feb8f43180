//! Student roster, dashboard view-model, and summary statistics.

pub mod dashboard;
pub mod stats;
pub mod student;

pub use dashboard::{Dashboard, DashboardState, ExportFormat, missing_information_notice, student_added_notice};
pub use stats::{AVERAGE_ATTENDANCE_PLACEHOLDER, PRESENT_TODAY_PLACEHOLDER_PCT, SummaryStats, compute_summary_stats};
pub use student::{BloodGroup, StudentForm, StudentId, StudentRecord};
