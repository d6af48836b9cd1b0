//! # shelf-core: Pure Domain Logic for Shelf
//!
//! This crate is the **heart** of Shelf. It contains the catalog's domain
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shelf Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Handlers (axum)                         │   │
//! │  │    list_books, create_book, get_author, login, ...             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   query   │  │ validation│                  │   │
//! │  │   │   Book    │  │ BookQuery │  │   rules   │                  │   │
//! │  │   │  Author   │  │ OrderKey  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shelf-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types (Book, Author, User)
//! - [`query`] - Typed book-listing queries parsed from request parameters
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Clock as an Argument**: The current year is always passed in, never read

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shelf_core::BookQuery` instead of
// `use shelf_core::query::BookQuery`

pub use error::ValidationError;
pub use query::{BookQuery, BookQueryParams, OrderField, OrderKey};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a book title, in characters.
///
/// Matches the column limit carried over from the original catalog schema.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of an author name, in characters.
pub const MAX_AUTHOR_NAME_LEN: usize = 100;

/// Maximum length of a free-text search query.
///
/// ## Why a cap?
/// Prevents pathological LIKE scans from arbitrarily long input.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
