// src/services/github.rs
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::ProjectQuery;
use crate::error::{FolioError, Result};
use crate::models::{RepositorySummary, SearchResponse};

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    api_url: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Repository search URL for the profile owner's projects.
    pub fn search_url(&self, query: &ProjectQuery) -> Result<Url> {
        let mut q = format!("user:{} fork:{}", query.username, !query.exclude_forks);
        for project in &query.exclude_projects {
            q.push_str(&format!(" -repo:{}/{}", query.username, project));
        }

        let per_page = query.limit.to_string();
        let url = Url::parse_with_params(
            &format!("{}/search/repositories", self.api_url),
            &[
                ("q", q.as_str()),
                ("sort", query.sort_by.as_str()),
                ("per_page", per_page.as_str()),
                ("type", "Repositories"),
            ],
        )?;

        Ok(url)
    }

    pub async fn fetch_repositories(&self, query: &ProjectQuery) -> Result<Vec<RepositorySummary>> {
        let url = self.search_url(query)?;
        debug!(%url, "Fetching repositories");

        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                let search: SearchResponse = response.json().await?;
                debug!(total = search.total_count, returned = search.items.len(), "Search complete");
                Ok(search.items)
            }
            StatusCode::NOT_FOUND => Err(FolioError::NotFound(format!("Resource not found: {}", url))),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if response
                    .headers()
                    .get("X-RateLimit-Remaining")
                    .and_then(|h| h.to_str().ok())
                    == Some("0") =>
            {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string();
                Err(FolioError::RateLimitExceeded(format!("API rate limit exceeded. Reset at: {}", reset)))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(FolioError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}
