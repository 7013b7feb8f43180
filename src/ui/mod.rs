//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod dashboard;
pub mod login_panel;
pub mod scope_panel;

pub use app::App;
