//! HTTP request handlers

pub mod auth;
pub mod health;
pub mod inventory;
pub mod merch;
pub mod reporting;
pub mod tour;

pub use auth::*;
pub use health::*;
pub use inventory::*;
pub use merch::*;
pub use reporting::*;
pub use tour::*;
