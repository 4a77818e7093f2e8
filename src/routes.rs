// src/routes.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::handlers::{api, web};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ==================
        // WEB UI ROUTES
        // ==================
        .route("/", get(web::index))
        .route("/projects", get(web::projects_fragment))
        .route("/projects/:name/open", get(web::open_project))
        // ==================
        // API ROUTES
        // ==================
        .route("/api/projects", get(api::list_projects))
        .route("/health", get(api::health))
        .layer(CompressionLayer::new())
        .with_state(state)
}
