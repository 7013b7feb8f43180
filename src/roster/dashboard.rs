//! Dashboard view-model: the in-memory roster for the selected scope.

use crate::error::ValidationError;
use crate::notify::Notice;
use crate::scope::AcademicScope;

use super::stats::{SummaryStats, compute_summary_stats};
use super::student::{StudentForm, StudentRecord};

/// Attendance export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "EXCEL",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Renderable dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    /// No students yet; shows a call to action.
    Empty,
    Populated,
}

/// Roster and add-student form for one academic scope.
///
/// The roster is append-only and lives only as long as this value.
pub struct Dashboard {
    scope: AcademicScope,
    roster: Vec<StudentRecord>,
    pub form: StudentForm,
    pub form_open: bool,
}

impl Dashboard {
    pub fn new(scope: AcademicScope) -> Self {
        Self {
            scope,
            roster: Vec::new(),
            form: StudentForm::default(),
            form_open: false,
        }
    }

    pub fn scope(&self) -> &AcademicScope {
        &self.scope
    }

    /// Students in insertion order.
    pub fn roster(&self) -> &[StudentRecord] {
        &self.roster
    }

    pub fn state(&self) -> DashboardState {
        if self.roster.is_empty() {
            DashboardState::Empty
        } else {
            DashboardState::Populated
        }
    }

    pub fn stats(&self) -> SummaryStats {
        compute_summary_stats(&self.roster)
    }

    /// Open the add-student dialog with a blank form.
    pub fn open_form(&mut self) {
        self.form.reset();
        self.form_open = true;
    }

    /// Admit the form's student to the roster.
    ///
    /// On success the form is cleared and closed. On failure nothing changes.
    pub fn add_student(&mut self) -> Result<&StudentRecord, ValidationError> {
        let record = self.form.to_record(&self.scope)?;
        tracing::info!("Added student {} to {}", record.name, self.scope.heading());

        self.roster.push(record);
        self.form.reset();
        self.form_open = false;

        Ok(&self.roster[self.roster.len() - 1])
    }

    /// Acknowledge an export request. No file is produced.
    pub fn export_attendance(&self, format: ExportFormat) -> Notice {
        tracing::info!(
            "Export {} requested for {} ({} students)",
            format.label(),
            self.scope.heading(),
            self.roster.len()
        );
        Notice::info(
            format!("Export {}", format.label()),
            "Attendance report will be downloaded shortly",
        )
    }

    /// Acknowledge today's attendance. Attendance counters are not changed.
    pub fn mark_attendance_today(&self) -> Notice {
        tracing::info!("Attendance marked for {}", self.scope.heading());
        Notice::info("Attendance Marked", "Today's attendance has been recorded")
    }
}

/// Notice for a student admitted to the roster.
pub fn student_added_notice(record: &StudentRecord) -> Notice {
    Notice::info("Student Added", format!("{} has been added successfully", record.name))
}

/// Notice for a rejected add-student form.
pub fn missing_information_notice() -> Notice {
    Notice::error("Missing Information", "Please fill in all required fields")
}
