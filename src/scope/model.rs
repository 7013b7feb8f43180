//! Academic scope enumerations and the scope triple.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Engineering department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "CIVIL")]
    Civil,
    #[serde(rename = "MECH")]
    Mech,
    #[serde(rename = "EEE")]
    Eee,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 6] = [
        Department::Ece,
        Department::It,
        Department::Cse,
        Department::Civil,
        Department::Mech,
        Department::Eee,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Department::Ece => "ECE",
            Department::It => "IT",
            Department::Cse => "CSE",
            Department::Civil => "CIVIL",
            Department::Mech => "MECH",
            Department::Eee => "EEE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Ece => "Electronics & Communication Engineering",
            Department::It => "Information Technology",
            Department::Cse => "Computer Science Engineering",
            Department::Civil => "Civil Engineering",
            Department::Mech => "Mechanical Engineering",
            Department::Eee => "Electrical & Electronics Engineering",
        }
    }
}

/// Year of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "I")]
    First,
    #[serde(rename = "II")]
    Second,
    #[serde(rename = "III")]
    Third,
    #[serde(rename = "IV")]
    Fourth,
}

impl Year {
    pub const ALL: [Year; 4] = [Year::First, Year::Second, Year::Third, Year::Fourth];

    /// Roman numeral code.
    pub fn code(&self) -> &'static str {
        match self {
            Year::First => "I",
            Year::Second => "II",
            Year::Third => "III",
            Year::Fourth => "IV",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Year::First => "First Year",
            Year::Second => "Second Year",
            Year::Third => "Third Year",
            Year::Fourth => "Fourth Year",
        }
    }
}

/// Semester number (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
}

impl Semester {
    pub const ALL: [Semester; 8] = [
        Semester::One,
        Semester::Two,
        Semester::Three,
        Semester::Four,
        Semester::Five,
        Semester::Six,
        Semester::Seven,
        Semester::Eight,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Semester::One => 1,
            Semester::Two => 2,
            Semester::Three => 3,
            Semester::Four => 4,
            Semester::Five => 5,
            Semester::Six => 6,
            Semester::Seven => 7,
            Semester::Eight => 8,
        }
    }

    pub fn label(&self) -> String {
        format!("Semester {}", self.number())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The {department, year, semester} triple that contextualizes dashboard data.
///
/// Only complete scopes exist as values of this type; partial selections live
/// in [`ScopeSelector`](super::ScopeSelector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcademicScope {
    pub department: Department,
    pub year: Year,
    pub semester: Semester,
}

impl AcademicScope {
    pub fn new(department: Department, year: Year, semester: Semester) -> Self {
        Self {
            department,
            year,
            semester,
        }
    }

    /// Short heading, e.g. "CSE - Year II - Semester 3".
    pub fn heading(&self) -> String {
        format!(
            "{} - Year {} - Semester {}",
            self.department, self.year, self.semester
        )
    }

    /// Summary with the full department label, shown before confirmation.
    pub fn summary(&self) -> String {
        format!(
            "{} - Year {} - Semester {}",
            self.department.label(),
            self.year,
            self.semester
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_sizes_and_order() {
        assert_eq!(Department::ALL.len(), 6);
        assert_eq!(Year::ALL.len(), 4);
        assert_eq!(Semester::ALL.len(), 8);

        let codes: Vec<_> = Department::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(codes, ["ECE", "IT", "CSE", "CIVIL", "MECH", "EEE"]);

        let numbers: Vec<_> = Semester::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_scope_serializes_as_codes() {
        let scope = AcademicScope::new(Department::Cse, Year::Second, Semester::Three);
        let json = serde_json::to_string(&scope).unwrap();
        assert_eq!(json, r#"{"department":"CSE","year":"II","semester":"3"}"#);

        let parsed: AcademicScope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scope);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let result = serde_json::from_str::<AcademicScope>(r#"{"department":"ARTS","year":"II","semester":"3"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_heading_and_summary() {
        let scope = AcademicScope::new(Department::Cse, Year::Second, Semester::Three);
        assert_eq!(scope.heading(), "CSE - Year II - Semester 3");
        assert_eq!(scope.summary(), "Computer Science Engineering - Year II - Semester 3");
    }
}
