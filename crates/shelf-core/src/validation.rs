//! # Validation Module
//!
//! Field validation rules for Shelf.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: axum extractors (Rust)                                       │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: catalog rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{validate_title, validate_publication_year};
//!
//! validate_title("The Shining").unwrap();
//! validate_publication_year(1977, 2026).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_AUTHOR_NAME_LEN, MAX_SEARCH_QUERY_LEN, MAX_TITLE_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_title;
///
/// assert!(validate_title("Harry Potter and the Chamber of Secrets").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates an author name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
pub fn validate_author_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_AUTHOR_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_AUTHOR_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (imposes no constraint)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a publication year against the current year.
///
/// ## Rules
/// - Must not exceed the current year (no future publications)
///
/// The current year is an argument so this stays a pure function; callers
/// pass `Utc::now().year()`.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_publication_year;
///
/// assert!(validate_publication_year(1997, 2026).is_ok());
/// assert!(validate_publication_year(2026, 2026).is_ok());
/// assert!(validate_publication_year(2027, 2026).is_err());
/// ```
pub fn validate_publication_year(year: i64, current_year: i64) -> ValidationResult<()> {
    if year > current_year {
        return Err(ValidationError::InFuture {
            field: "publication_year".to_string(),
            current_year,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format for a named field.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a UUID: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_uuid;
///
/// assert!(validate_uuid("author", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("author", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("The Shining").is_ok());
        assert!(validate_title("  padded but fine  ").is_ok());

        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_author_name() {
        assert!(validate_author_name("J.K. Rowling").is_ok());
        assert!(validate_author_name("").is_err());
        assert!(validate_author_name(&"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_publication_year() {
        assert!(validate_publication_year(1997, 2026).is_ok());
        // Current year itself is allowed
        assert!(validate_publication_year(2026, 2026).is_ok());
        // One past the current year is the canonical failure
        assert!(validate_publication_year(2027, 2026).is_err());

        let err = validate_publication_year(2100, 2026).unwrap_err();
        assert_eq!(err.field(), "publication_year");
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  harry  ").unwrap(), "harry");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("author", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("author", "").is_err());
        assert!(validate_uuid("author", "not-a-uuid").is_err());

        let err = validate_uuid("author", "123").unwrap_err();
        assert_eq!(err.field(), "author");
    }
}
