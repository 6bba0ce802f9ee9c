mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    Router::new()
        // Calculation log
        .route("/calculations", post(handlers::save_calculation))
        .route("/calculations", get(handlers::list_calculations))
        .route("/calculations/recent", get(handlers::list_recent_calculations))
        // Health
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
