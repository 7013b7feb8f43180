pub mod auth;
pub mod config;
pub mod error;
pub mod flow;
pub mod notify;
pub mod roster;
pub mod scope;
pub mod storage;
pub mod ui;

pub use error::{AppError, Result};
