//! # Shelf API
//!
//! REST server for the Shelf book catalog.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf API                                      │
//! │                                                                         │
//! │  Client ───► axum Router ───► AuthUser gate ───► Handler ───► shelf-db │
//! │                  │            (mutations only)      │                   │
//! │                  │                                  ▼                   │
//! │                  │                           shelf-core                 │
//! │                  │                    (validation, BookQuery)           │
//! │                  ▼                                                      │
//! │           TraceLayer + CORS                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `SHELF_BIND` - Bind address (default: 0.0.0.0:8000)
//! - `SHELF_DATABASE_PATH` - SQLite file path (default: ./shelf.db)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `JWT_LIFETIME_SECS` - Access token lifetime (default: 3600)

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;

use shelf_db::Database;

use crate::auth::JwtManager;

/// Shared application state.
///
/// One instance lives behind an `Arc` for the whole process; handlers
/// receive it through axum's `State` extractor.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
}

impl AppState {
    /// Builds application state from loaded configuration and a database.
    ///
    /// Only the JWT settings survive into the state; the rest of the
    /// configuration is consumed at startup.
    pub fn new(config: ApiConfig, db: Database) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
        AppState { db, jwt }
    }
}
