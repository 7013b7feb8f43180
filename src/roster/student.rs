//! Student records and the add-student form.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::scope::{AcademicScope, Department, Semester, Year};

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque student identifier generated at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(Uuid);

impl StudentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A student on the roster, stamped with the scope it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub department: Department,
    pub year: Year,
    pub semester: Semester,
    pub blood_group: Option<BloodGroup>,
    pub phone: String,
    pub email: String,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub attendance: u32,
}

impl StudentRecord {
    pub fn scope(&self) -> AcademicScope {
        AcademicScope::new(self.department, self.year, self.semester)
    }
}

/// Add-student form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: Option<BloodGroup>,
    pub parent_phone: String,
    pub address: String,
}

impl StudentForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check required fields in display order: name, email, phone.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("name", &self.name), ("email", &self.email), ("phone", &self.phone)] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingRequiredField { field });
            }
        }
        Ok(())
    }

    /// Build a record under `scope`, with a fresh id and zero attendance.
    pub fn to_record(&self, scope: &AcademicScope) -> Result<StudentRecord, ValidationError> {
        self.validate()?;

        Ok(StudentRecord {
            id: StudentId::generate(),
            name: self.name.trim().to_string(),
            department: scope.department,
            year: scope.year,
            semester: scope.semester,
            blood_group: self.blood_group,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            parent_phone: optional(&self.parent_phone),
            address: optional(&self.address),
            attendance: 0,
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
