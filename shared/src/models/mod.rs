//! Domain models for the Tour Merch Tracker

mod inventory;
mod merch;
mod tour;
mod user;

pub use inventory::*;
pub use merch::*;
pub use tour::*;
pub use user::*;
