// src/handlers/web.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use std::sync::Arc;

use crate::services::click::RedirectNavigator;
use crate::templates;
use crate::utils::validation::validate_repo_name;
use crate::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    state.feed.refresh_if_stale().await;
    let snapshot = state.feed.snapshot().await;

    Html(templates::index::render(
        &snapshot,
        &state.config.github.username,
        state.config.skeleton_count(),
    ))
}

/// The projects section alone, for embedding in another page.
pub async fn projects_fragment(State(state): State<Arc<AppState>>) -> Html<String> {
    state.feed.refresh_if_stale().await;
    let snapshot = state.feed.snapshot().await;

    Html(templates::projects::render_section(
        snapshot.loading,
        snapshot.repositories.as_deref().map(Vec::as_slice),
        &state.config.github.username,
        state.config.skeleton_count(),
    ))
}

/// Card click: track, then send the browser to the clone URL.
pub async fn open_project(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Redirect, StatusCode> {
    validate_repo_name(&name).map_err(|_| StatusCode::NOT_FOUND)?;

    let repo = state
        .feed
        .find(&name)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let mut navigator = RedirectNavigator::default();
    state.clicks.click(&repo, &mut navigator);

    navigator
        .into_location()
        .map(|location| Redirect::to(&location))
        .ok_or(StatusCode::NOT_FOUND)
}
