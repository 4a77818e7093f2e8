// src/templates/mod.rs
pub mod index;
pub mod language;
pub mod projects;

mod layout;

pub use layout::{render_page, render_page_with_refresh};

// Helper function for HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
