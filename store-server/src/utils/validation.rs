//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by
//! the request handlers. Limits are UX-driven; the document store does
//! not enforce lengths itself.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product names, option axes, user names
pub const MAX_NAME_LEN: usize = 200;

/// Slugs and SKUs
pub const MAX_KEY_LEN: usize = 100;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Address fields
pub const MAX_ADDRESS_LEN: usize = 500;

/// Maximum quantity per cart line
pub const MAX_QUANTITY: u32 = 9999;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a cart quantity for an add operation (must be ≥ 1)
pub fn validate_add_quantity(quantity: i64) -> Result<u32, AppError> {
    if quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }
    if quantity > i64::from(MAX_QUANTITY) {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY})"
        )));
    }
    Ok(quantity as u32)
}

/// Validate a cart quantity for a set operation (0 removes the line)
pub fn validate_set_quantity(quantity: i64) -> Result<u32, AppError> {
    if quantity < 0 {
        return Err(AppError::validation("quantity must not be negative"));
    }
    if quantity > i64::from(MAX_QUANTITY) {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY})"
        )));
    }
    Ok(quantity as u32)
}
