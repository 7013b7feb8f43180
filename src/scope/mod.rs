//! Academic scope selection and persistence.

pub mod model;
pub mod selector;
pub mod store;

pub use model::{AcademicScope, Department, Semester, Year};
pub use selector::ScopeSelector;
pub use store::{SCOPE_KEY, ScopeStore};
