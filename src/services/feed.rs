// src/services/feed.rs
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::time;
use tracing::{debug, info, warn};

use super::github::GitHubClient;
use crate::config::ProjectQuery;
use crate::models::{FeedSnapshot, RepositorySummary};

/// Minimum gap between on-demand refreshes.
const RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Owner of the loading flag and the last good repository list.
///
/// The list is only ever replaced by a newer successful fetch. The moka entry
/// for the username expires after `cache_ttl` and marks the list as stale.
#[derive(Clone)]
pub struct ProjectFeed {
    github: Arc<GitHubClient>,
    query: Arc<ProjectQuery>,
    repositories: Arc<RwLock<Option<Arc<Vec<RepositorySummary>>>>>,
    fresh: Arc<Cache<String, Instant>>,
    loading: Arc<AtomicBool>,
    refresh_lock: Arc<Mutex<()>>,
    created: Instant,
    // Millis since `created` plus one; zero means never attempted
    last_attempt: Arc<AtomicU64>,
}

impl ProjectFeed {
    pub fn new(github: GitHubClient, query: ProjectQuery, cache_ttl: Duration) -> Self {
        Self {
            github: Arc::new(github),
            query: Arc::new(query),
            repositories: Arc::new(RwLock::new(None)),
            fresh: Arc::new(
                Cache::builder()
                    .max_capacity(16)
                    .time_to_live(cache_ttl)
                    .build(),
            ),
            loading: Arc::new(AtomicBool::new(true)),
            refresh_lock: Arc::new(Mutex::new(())),
            created: Instant::now(),
            last_attempt: Arc::new(AtomicU64::new(0)),
        }
    }

    fn key(&self) -> &str {
        &self.query.username
    }

    fn is_fresh(&self) -> bool {
        self.fresh.contains_key(self.key())
    }

    fn now_tick(&self) -> u64 {
        self.created.elapsed().as_millis() as u64 + 1
    }

    /// Claims the on-demand refresh slot if the backoff window has passed.
    fn claim_attempt(&self) -> bool {
        let now = self.now_tick();
        let last = self.last_attempt.load(Ordering::SeqCst);
        if last != 0 && now.saturating_sub(last) < RETRY_BACKOFF.as_millis() as u64 {
            return false;
        }
        self.last_attempt
            .compare_exchange(last, now, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            loading: self.loading.load(Ordering::SeqCst),
            repositories: self.repositories.read().await.clone(),
        }
    }

    pub async fn find(&self, name: &str) -> Option<RepositorySummary> {
        self.repositories
            .read()
            .await
            .as_ref()
            .and_then(|repos| repos.iter().find(|repo| repo.name == name).cloned())
    }

    /// Fetches the list once, waiting for any refresh already running.
    /// Returns `false` if the fetch failed.
    pub async fn refresh(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;
        self.fetch().await
    }

    /// Like [`ProjectFeed::refresh`], but gives up if a refresh is running.
    pub async fn try_refresh(&self) -> bool {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            debug!("Refresh already in progress");
            return false;
        };
        self.fetch().await
    }

    // Caller holds `refresh_lock`
    async fn fetch(&self) -> bool {
        self.last_attempt.store(self.now_tick(), Ordering::SeqCst);

        // Skeletons only until the first list arrives
        let has_list = self.repositories.read().await.is_some();
        self.loading.store(!has_list, Ordering::SeqCst);

        let fetched = match self.github.fetch_repositories(&self.query).await {
            Ok(repos) => {
                info!(username = %self.query.username, count = repos.len(), "Repositories refreshed");
                *self.repositories.write().await = Some(Arc::new(repos));
                self.fresh.insert(self.key().to_string(), Instant::now()).await;
                true
            }
            Err(e) => {
                warn!(username = %self.query.username, error = %e, "Failed to refresh repositories");
                false
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        fetched
    }

    /// Starts a background refresh when the list is missing or older than the
    /// cache TTL, at most once per backoff window.
    pub async fn refresh_if_stale(&self) {
        if self.is_fresh() || !self.claim_attempt() {
            return;
        }

        let feed = self.clone();
        tokio::spawn(async move {
            feed.try_refresh().await;
        });
    }

    /// Periodic refresh loop.
    pub async fn start(self, every: Duration) {
        let mut interval = time::interval(every);

        info!("Project feed started, refreshing every {} seconds", every.as_secs());

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }

    #[cfg(test)]
    pub async fn seed(&self, repos: Vec<RepositorySummary>) {
        *self.repositories.write().await = Some(Arc::new(repos));
        self.fresh.insert(self.key().to_string(), Instant::now()).await;
        self.loading.store(false, Ordering::SeqCst);
    }
}
