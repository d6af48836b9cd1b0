//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the HTTP caller sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → HTTP response            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the offending field
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// These errors occur when caller input doesn't meet catalog rules.
/// Raised both for request bodies (create/update) and for query parameters
/// on the listing endpoint. Every variant carries the field name so the
/// HTTP layer can surface a field-level message.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., non-integer year parameter, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Publication year lies in the future.
    ///
    /// ## When This Occurs
    /// - Creating or updating a book dated after the current UTC year
    #[error("{field} cannot be in the future (current year is {current_year})")]
    InFuture { field: String, current_year: i64 },

    /// A reference field points at a record that does not exist.
    ///
    /// ## When This Occurs
    /// - Book create/update naming an unknown author id
    #[error("{field} '{value}' does not exist")]
    UnknownReference { field: String, value: String },
}

impl ValidationError {
    /// Name of the field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InFuture { field, .. }
            | ValidationError::UnknownReference { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::InFuture {
            field: "publication_year".to_string(),
            current_year: 2026,
        };
        assert_eq!(
            err.to_string(),
            "publication_year cannot be in the future (current year is 2026)"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::InvalidFormat {
            field: "publication_year_min".to_string(),
            reason: "must be an integer".to_string(),
        };
        assert_eq!(err.field(), "publication_year_min");
    }
}
