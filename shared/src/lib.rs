//! Shared types and models for the Tour Merch Tracker
//!
//! This crate contains the domain models and report calculations shared
//! between the backend and the browser (via WASM).

pub mod models;
pub mod reports;
pub mod types;
pub mod validation;

pub use models::*;
pub use reports::*;
pub use types::*;
pub use validation::*;
