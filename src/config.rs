// src/config.rs
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{FolioError, Result};
use crate::utils::validation::validate_username;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Stars,
    Updated,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Stars => "stars",
            SortBy::Updated => "updated",
        }
    }
}

impl FromStr for SortBy {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stars" => Ok(SortBy::Stars),
            "updated" => Ok(SortBy::Updated),
            other => Err(FolioError::ConfigError(format!(
                "GITHUB_SORT_BY must be 'stars' or 'updated', got '{}'",
                other
            ))),
        }
    }
}

/// Which repositories the feed asks GitHub for.
#[derive(Debug, Clone)]
pub struct ProjectQuery {
    pub username: String,
    pub limit: usize,
    pub sort_by: SortBy,
    pub exclude_forks: bool,
    pub exclude_projects: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub id: String,
    pub api_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub github: ProjectQuery,
    pub github_token: Option<String>,
    pub github_api_url: String,
    /// Present only when a non-empty `GA_ID` is configured.
    pub analytics: Option<AnalyticsConfig>,
    pub refresh_interval: Duration,
    pub cache_ttl: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FolioError::ConfigError(format!("{} has an invalid value: '{}'", key, value)))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("GITHUB_USERNAME")
            .map_err(|_| FolioError::ConfigError("GITHUB_USERNAME must be set".to_string()))?;
        validate_username(&username).map_err(FolioError::ConfigError)?;

        let limit: usize = parse_var("GITHUB_LIMIT", &env_or("GITHUB_LIMIT", "8"))?;
        if limit == 0 {
            return Err(FolioError::ConfigError("GITHUB_LIMIT must be positive".to_string()));
        }

        let exclude_projects = env_or("GITHUB_EXCLUDE_PROJECTS", "")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let analytics = env_opt("GA_ID").map(|id| AnalyticsConfig {
            id,
            api_secret: env_opt("GA_API_SECRET"),
        });

        let refresh_secs: u64 = parse_var(
            "REFRESH_INTERVAL_SECS",
            &env_or("REFRESH_INTERVAL_SECS", "600"),
        )?;
        let cache_ttl_secs: u64 = parse_var("CACHE_TTL_SECS", &env_or("CACHE_TTL_SECS", "900"))?;
        if refresh_secs == 0 || cache_ttl_secs == 0 {
            return Err(FolioError::ConfigError(
                "REFRESH_INTERVAL_SECS and CACHE_TTL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", &env_or("PORT", "3000"))?,
            github: ProjectQuery {
                username,
                limit,
                sort_by: env_or("GITHUB_SORT_BY", "stars").parse()?,
                exclude_forks: parse_var("GITHUB_EXCLUDE_FORKS", &env_or("GITHUB_EXCLUDE_FORKS", "true"))?,
                exclude_projects,
            },
            github_token: env_opt("GITHUB_TOKEN"),
            github_api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            analytics,
            refresh_interval: Duration::from_secs(refresh_secs),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| FolioError::ConfigError(format!("Invalid server address {}:{}", self.host, self.port)))
    }

    /// Skeleton placeholder count.
    pub fn skeleton_count(&self) -> usize {
        self.github.limit
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        github: ProjectQuery {
            username: "octocat".to_string(),
            limit: 4,
            sort_by: SortBy::Stars,
            exclude_forks: true,
            exclude_projects: Vec::new(),
        },
        github_token: None,
        github_api_url: api_url.to_string(),
        analytics: None,
        refresh_interval: Duration::from_secs(600),
        cache_ttl: Duration::from_secs(900),
    }
}
