//! # Repository Module
//!
//! Database repository implementations for the Shelf catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.books().list(&query)                                       │
//! │       ▼                                                                 │
//! │  BookRepository                                                        │
//! │  ├── list(&self, query)        ← dynamic WHERE/ORDER BY               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, book)                                               │
//! │  ├── update(&self, book)                                               │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Easy to exercise against an in-memory database in tests             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - Book CRUD plus the filter/search/order listing
//! - [`author::AuthorRepository`] - Author CRUD with cascade semantics
//! - [`user::UserRepository`] - API user storage for access control

pub mod author;
pub mod book;
pub mod user;
