//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of a single color label
pub const MAX_COLOR_LENGTH: usize = 10;

// =============================================================================
// Prices
// =============================================================================

/// Total number of digits a price may carry
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Number of decimal places a price may carry
pub const PRICE_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Validation messages
// =============================================================================

/// Message attached to a missing required field
pub const MSG_REQUIRED: &str = "This field is required.";

/// Key for errors that belong to the payload as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message attached to a duplicated email address
pub const MSG_EMAIL_TAKEN: &str = "user with this email already exists.";

/// Build the message for a relation id that does not resolve.
pub fn invalid_pk_message(id: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}
