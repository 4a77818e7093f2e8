// src/services/mod.rs
pub mod analytics;
pub mod click;
pub mod feed;
pub mod github;

#[cfg(test)]
pub(crate) mod testing;
