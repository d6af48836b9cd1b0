//! HTTP request handlers.
//!
//! One module per resource. Handlers stay thin: they parse input, call
//! validation from shelf-core, delegate persistence to shelf-db, and
//! shape the response.

pub mod auth;
pub mod authors;
pub mod books;
pub mod status;
