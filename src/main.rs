// folio/src/main.rs
mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod templates;
mod utils;

use crate::config::Config;
use crate::routes::create_router;
use crate::services::analytics::{Analytics, GoogleAnalytics};
use crate::services::click::ClickHandler;
use crate::services::feed::ProjectFeed;
use crate::services::github::GitHubClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub feed: ProjectFeed,
    pub clicks: ClickHandler,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info")),
        )
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .init();

    tracing::info!("🚀 Starting folio...");

    let config = Config::from_env()?;

    tracing::info!(
        "📦 Showing up to {} repositories for {} (sorted by {})",
        config.github.limit,
        config.github.username,
        config.github.sort_by.as_str()
    );

    let github = GitHubClient::new(&config.github_api_url, config.github_token.clone())?;
    let feed = ProjectFeed::new(github, config.github.clone(), config.cache_ttl);

    let analytics = match &config.analytics {
        Some(analytics_config) => {
            tracing::info!("📊 Analytics enabled ({})", analytics_config.id);
            Some(Arc::new(GoogleAnalytics::new(analytics_config)?) as Arc<dyn Analytics>)
        }
        None => None,
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        feed: feed.clone(),
        clicks: ClickHandler::new(analytics),
    });

    // Background refresh; the first tick fires immediately
    tracing::info!("🔄 Starting repository refresh every {}s", config.refresh_interval.as_secs());
    tokio::spawn(feed.start(config.refresh_interval));

    let app = create_router(state)
        .layer(axum::middleware::from_fn(
            crate::middleware::security::security_headers,
        ))
        .layer(axum::middleware::from_fn(
            crate::middleware::security::attack_prevention,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = config.server_addr()?;
    tracing::info!("✅ folio listening on {}", addr);
    tracing::info!("🌐 Projects: http://{}/", addr);
    tracing::info!("🔌 API: http://{}/api/projects", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
