// src/templates/index.rs
use super::{projects, render_page, render_page_with_refresh};
use crate::models::FeedSnapshot;

/// Seconds between reloads while the page only shows placeholders.
pub const SKELETON_REFRESH_SECS: u64 = 3;

pub fn render(snapshot: &FeedSnapshot, username: &str, skeleton_count: usize) -> String {
    let repositories = snapshot.repositories.as_deref().map(Vec::as_slice);
    let section = projects::render_section(snapshot.loading, repositories, username, skeleton_count);
    let title = format!("{} - Portfolio", username);

    if snapshot.display_state().is_skeleton() {
        render_page_with_refresh(&title, &section, Some(SKELETON_REFRESH_SECS))
    } else {
        render_page(&title, &section)
    }
}
