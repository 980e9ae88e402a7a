// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        bids::bids_handler, bookings::bookings_handler, categories::categories_handler,
        customers::customers_handler, jobs::jobs_handler, notifications::notifications_handler,
        reviews::reviews_handler, settings::settings_handler, stats::stats_handler,
        workers::workers_handler,
    },
    AppState,
};

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/jobs", jobs_handler())
        .nest("/bids", bids_handler())
        .nest("/bookings", bookings_handler())
        .nest("/workers", workers_handler())
        .nest("/customers", customers_handler())
        .nest("/servicecategories", categories_handler())
        .nest("/reviews", reviews_handler())
        .nest("/notifications", notifications_handler())
        .nest("/stats", stats_handler())
        .nest("/config", settings_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
