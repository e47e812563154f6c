use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use crate::services::ReminderService;

pub type AppState = Arc<ReminderService>;

/// Builds the full application router. Shared between the binary and the
/// integration tests so both exercise the same routes and middleware.
pub fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/reminders",
            get(handlers::list_reminders).post(handlers::create_reminder),
        )
        .route("/reminders/upcoming", get(handlers::upcoming_reminders))
        .route("/reminders/barcode/:barcode", get(handlers::lookup_barcode))
        .route(
            "/reminders/:id",
            get(handlers::get_reminder)
                .patch(handlers::update_reminder)
                .delete(handlers::delete_reminder),
        )
        .with_state(state);

    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_credentials(false),
        )
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Expiry Reminder Server"
}

async fn health_check() -> &'static str {
    "OK"
}
