//! Persisted scope under a fixed client-local key.

use std::sync::Arc;

use crate::error::Result;
use crate::storage::KeyValueStore;

use super::model::AcademicScope;

/// Key the selected scope is stored under.
pub const SCOPE_KEY: &str = "selectedContext";

/// Reads and writes the confirmed [`AcademicScope`].
#[derive(Clone)]
pub struct ScopeStore {
    store: Arc<dyn KeyValueStore>,
}

impl ScopeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted scope.
    ///
    /// A value that no longer decodes is treated as absent.
    pub fn load(&self) -> Result<Option<AcademicScope>> {
        let Some(raw) = self.store.get(SCOPE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(scope) => Ok(Some(scope)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable persisted scope: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist `scope`, overwriting any previous value.
    pub fn save(&self, scope: &AcademicScope) -> Result<()> {
        let raw = serde_json::to_string(scope)?;
        self.store.set(SCOPE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Department, Semester, Year};
    use crate::storage::MemoryStore;

    fn store() -> (Arc<MemoryStore>, ScopeStore) {
        let backing = Arc::new(MemoryStore::new());
        (backing.clone(), ScopeStore::new(backing))
    }

    #[test]
    fn test_empty_store_has_no_scope() {
        let (_, scopes) = store();
        assert_eq!(scopes.load().unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_previous() {
        let (backing, scopes) = store();
        scopes
            .save(&AcademicScope::new(Department::Ece, Year::First, Semester::One))
            .unwrap();
        let latest = AcademicScope::new(Department::Mech, Year::Fourth, Semester::Eight);
        scopes.save(&latest).unwrap();

        assert_eq!(scopes.load().unwrap(), Some(latest));
        assert_eq!(
            backing.get(SCOPE_KEY).unwrap().as_deref(),
            Some(r#"{"department":"MECH","year":"IV","semester":"8"}"#)
        );
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let (_, scopes) = store();
        scopes
            .save(&AcademicScope::new(Department::It, Year::Third, Semester::Five))
            .unwrap();

        assert_eq!(scopes.load().unwrap(), scopes.load().unwrap());
    }

    #[test]
    fn test_garbage_value_reads_as_absent() {
        let (backing, scopes) = store();
        backing.set(SCOPE_KEY, "{\"department\":\"\"}").unwrap();

        assert_eq!(scopes.load().unwrap(), None);
    }
}
