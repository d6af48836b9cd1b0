//! # Record Types
//!
//! Persistent record types shared across the Shelf workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Record Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Author      │   │      Book       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  author_id (FK) │   │  id (UUID)      │       │
//! │  │  name           │   │  title          │   │  username       │       │
//! │  │                 │   │  publication_yr │   │  password_hash  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Author 1 ──── * Book   (deleting an author cascades to their books)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Author
// =============================================================================

/// A book author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Author {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name of the author.
    pub name: String,

    /// When the author was created.
    pub created_at: DateTime<Utc>,

    /// When the author was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Book
// =============================================================================

/// A published book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Title of the book. Non-empty after trimming.
    pub title: String,

    /// Year the book was published. Never in the future.
    pub publication_year: i64,

    /// The author who wrote this book (many-to-one).
    pub author_id: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// An API user. Only existence and activity matter for access control;
/// there is no role granularity beyond authenticated-vs-anonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique across users.
    pub username: String,

    /// argon2 hash of the password. Never serialized to callers.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Deactivated users keep their tokens but lose mutation access.
    pub is_active: bool,

    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serializes_all_fields() {
        let book = Book {
            id: "b1".to_string(),
            title: "A Game of Thrones".to_string(),
            publication_year: 1996,
            author_id: "a1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["title"], "A Game of Thrones");
        assert_eq!(json["publication_year"], 1996);
        assert_eq!(json["author_id"], "a1");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: "u1".to_string(),
            username: "reader".to_string(),
            password_hash: "secret-hash".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
