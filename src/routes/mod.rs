use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{create_school_order, health_check};

pub fn create_routes(pool: SqlitePool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/school-orders", post(create_school_order))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(pool);

    apply_security_headers(router)
}
