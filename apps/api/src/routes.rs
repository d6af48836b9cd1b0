//! HTTP router assembly and server entry point.
//!
//! ## Route Map
//! ```text
//! GET    /api/health                  → status::health
//! POST   /api/auth/register/          → auth::register
//! POST   /api/auth/login/             → auth::login
//! GET    /api/books/                  → books::list       (filter/search/order)
//! GET    /api/books/:id/              → books::get
//! POST   /api/books/create/           → books::create     (auth)
//! PUT    /api/books/:id/update/       → books::update     (auth)
//! DELETE /api/books/:id/delete/       → books::delete     (auth)
//! GET    /api/authors/                → authors::list
//! GET    /api/authors/:id/            → authors::get
//! POST   /api/authors/create/         → authors::create   (auth)
//! DELETE /api/authors/:id/delete/     → authors::delete   (auth)
//! ```

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::status::health))
        .route("/api/auth/register/", post(handlers::auth::register))
        .route("/api/auth/login/", post(handlers::auth::login))
        .route("/api/books/", get(handlers::books::list))
        .route("/api/books/:id/", get(handlers::books::get))
        .route("/api/books/create/", post(handlers::books::create))
        .route("/api/books/:id/update/", put(handlers::books::update))
        .route("/api/books/:id/delete/", delete(handlers::books::delete))
        .route("/api/authors/", get(handlers::authors::list))
        .route("/api/authors/:id/", get(handlers::authors::get))
        .route("/api/authors/create/", post(handlers::authors::create))
        .route(
            "/api/authors/:id/delete/",
            delete(handlers::authors::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(state: Arc<AppState>, bind_addr: &str) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
