//! Business logic services for the Tour Merch Tracker

pub mod auth;
pub mod inventory;
pub mod merch;
pub mod reporting;
pub mod tour;

pub use auth::AuthService;
pub use inventory::InventoryService;
pub use merch::MerchService;
pub use reporting::ReportingService;
pub use tour::TourService;
