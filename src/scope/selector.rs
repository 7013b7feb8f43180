//! Scope selection form state.

use crate::error::{Result, ValidationError};

use super::model::{AcademicScope, Department, Semester, Year};
use super::store::ScopeStore;

/// Three independent selection fields, each possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSelector {
    pub department: Option<Department>,
    pub year: Option<Year>,
    pub semester: Option<Semester>,
}

impl ScopeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all three fields.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Selector prefilled with an existing scope, for changing it.
    pub fn from_scope(scope: &AcademicScope) -> Self {
        Self {
            department: Some(scope.department),
            year: Some(scope.year),
            semester: Some(scope.semester),
        }
    }

    /// The selected scope, if all three fields are populated.
    pub fn selection(&self) -> Option<AcademicScope> {
        Some(AcademicScope::new(self.department?, self.year?, self.semester?))
    }

    pub fn is_complete(&self) -> bool {
        self.selection().is_some()
    }

    /// Human-readable summary shown before confirmation.
    pub fn summary(&self) -> Option<String> {
        self.selection().map(|scope| scope.summary())
    }

    /// Validate and persist the selection.
    ///
    /// On failure the persisted scope is left untouched.
    pub fn confirm_selection(&self, scopes: &ScopeStore) -> Result<AcademicScope> {
        let scope = self.selection().ok_or(ValidationError::IncompleteScope)?;
        scopes.save(&scope)?;
        tracing::info!("Scope confirmed: {}", scope.heading());
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::storage::MemoryStore;

    fn scopes() -> ScopeStore {
        ScopeStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_incomplete_selection_rejected() {
        let store = scopes();
        let partials = [
            ScopeSelector::default(),
            ScopeSelector {
                department: Some(Department::Cse),
                ..Default::default()
            },
            ScopeSelector {
                department: Some(Department::Cse),
                year: Some(Year::Second),
                semester: None,
            },
            ScopeSelector {
                department: None,
                year: Some(Year::Second),
                semester: Some(Semester::Three),
            },
        ];

        for selector in partials {
            assert!(!selector.is_complete());
            assert!(selector.summary().is_none());
            let result = selector.confirm_selection(&store);
            assert!(matches!(
                result,
                Err(AppError::Validation(ValidationError::IncompleteScope))
            ));
        }
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_failed_confirm_keeps_previous_scope() {
        let store = scopes();
        let previous = AcademicScope::new(Department::Ece, Year::First, Semester::One);
        store.save(&previous).unwrap();

        let selector = ScopeSelector {
            department: Some(Department::Cse),
            year: None,
            semester: Some(Semester::Three),
        };
        assert!(selector.confirm_selection(&store).is_err());
        assert_eq!(store.load().unwrap(), Some(previous));
    }

    #[test]
    fn test_confirm_persists_scope() {
        let store = scopes();
        let selector = ScopeSelector {
            department: Some(Department::Cse),
            year: Some(Year::Second),
            semester: Some(Semester::Three),
        };

        assert_eq!(
            selector.summary().as_deref(),
            Some("Computer Science Engineering - Year II - Semester 3")
        );

        let scope = selector.confirm_selection(&store).unwrap();
        assert_eq!(scope, AcademicScope::new(Department::Cse, Year::Second, Semester::Three));
        assert_eq!(store.load().unwrap(), Some(scope));
    }

    #[test]
    fn test_reset() {
        let mut selector = ScopeSelector {
            department: Some(Department::Civil),
            year: Some(Year::Third),
            semester: Some(Semester::Six),
        };
        selector.reset();
        assert_eq!(selector, ScopeSelector::new());
    }

    #[test]
    fn test_from_scope_prefills_all_fields() {
        let scope = AcademicScope::new(Department::Mech, Year::Fourth, Semester::Seven);
        let selector = ScopeSelector::from_scope(&scope);

        assert!(selector.is_complete());
        assert_eq!(selector.selection(), Some(scope));
    }
}
