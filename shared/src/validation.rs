//! Validation utilities for user-submitted data

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::DateRange;

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate a stock count when present. `None` means "not counted yet".
pub fn validate_count(field: &'static str, count: Option<i32>) -> Result<(), ValidationError> {
    match count {
        Some(n) if n < 0 => Err(ValidationError::new(field, "Count cannot be negative")),
        _ => Ok(()),
    }
}

/// Validate a variant price
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        return Err(ValidationError::new("price", "Price cannot be negative"));
    }
    Ok(())
}

/// Validate a tour's date range
pub fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    if range.end < range.start {
        return Err(ValidationError::new("end_date", "End date must not be before start date"));
    }
    Ok(())
}

/// Validate a required display name
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new(field, "Must not be empty"));
    }
    if name.len() > 200 {
        return Err(ValidationError::new(field, "Must be at most 200 characters"));
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err(ValidationError::new("email", "Invalid email format"))
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password", "Password must be at least 8 characters"));
    }
    Ok(())
}
