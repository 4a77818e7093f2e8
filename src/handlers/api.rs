// src/handlers/api.rs
use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::{HealthResponse, ProjectsResponse};
use crate::AppState;

pub async fn list_projects(State(state): State<Arc<AppState>>) -> Json<ProjectsResponse> {
    state.feed.refresh_if_stale().await;
    let snapshot = state.feed.snapshot().await;

    Json(ProjectsResponse {
        loading: snapshot.loading,
        repositories: snapshot.repositories.map(|repos| repos.as_ref().clone()),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
