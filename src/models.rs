// src/models.rs
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The subset of GitHub's repository JSON shown on a project card.
///
/// Every field is optional on the wire; absent values render as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    /// Demo URL, often empty.
    pub homepage: Option<String>,
    pub clone_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks: u64,
    pub topics: Vec<String>,
}

// GitHub search API envelope
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepositorySummary>,
}

/// What the projects section shows for a given `(loading, repositories)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState<'a> {
    Skeleton,
    Empty,
    Populated(&'a [RepositorySummary]),
}

impl<'a> DisplayState<'a> {
    /// Skeletons while loading or before any list exists; an empty list is
    /// shown as zero cards, not as skeletons.
    pub fn select(loading: bool, repositories: Option<&'a [RepositorySummary]>) -> Self {
        match repositories {
            _ if loading => DisplayState::Skeleton,
            None => DisplayState::Skeleton,
            Some([]) => DisplayState::Empty,
            Some(repos) => DisplayState::Populated(repos),
        }
    }

    pub fn is_skeleton(&self) -> bool {
        matches!(self, DisplayState::Skeleton)
    }
}

/// Point-in-time view of the feed handed to the renderers.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub loading: bool,
    pub repositories: Option<Arc<Vec<RepositorySummary>>>,
}

impl FeedSnapshot {
    pub fn display_state(&self) -> DisplayState<'_> {
        DisplayState::select(self.loading, self.repositories.as_deref().map(Vec::as_slice))
    }
}

// API response types
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub loading: bool,
    pub repositories: Option<Vec<RepositorySummary>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> RepositorySummary {
        RepositorySummary {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let repo: RepositorySummary = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();

        assert_eq!(repo.name, "bare");
        assert_eq!(repo.description, None);
        assert_eq!(repo.homepage, None);
        assert_eq!(repo.language, None);
        assert_eq!(repo.clone_url, "");
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks, 0);
        assert!(repo.topics.is_empty());
    }

    #[test]
    fn test_null_language_and_extra_fields() {
        let json = r#"{
            "name": "gitprofile",
            "full_name": "arifszn/gitprofile",
            "description": "Portfolio",
            "homepage": "",
            "clone_url": "https://github.com/arifszn/gitprofile.git",
            "language": null,
            "stargazers_count": 42,
            "forks": 7,
            "topics": ["react", "cli"],
            "fork": false
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();

        assert_eq!(repo.language, None);
        assert_eq!(repo.homepage.as_deref(), Some(""));
        assert_eq!(repo.stargazers_count, 42);
        assert_eq!(repo.forks, 7);
        assert_eq!(repo.topics, vec!["react", "cli"]);
    }

    #[test]
    fn test_select_skeleton_while_loading() {
        let repos = vec![repo("a")];

        assert_eq!(DisplayState::select(true, None), DisplayState::Skeleton);
        assert_eq!(DisplayState::select(true, Some(&[][..])), DisplayState::Skeleton);
        assert_eq!(DisplayState::select(true, Some(&repos[..])), DisplayState::Skeleton);
    }

    #[test]
    fn test_select_skeleton_when_list_absent() {
        assert_eq!(DisplayState::select(false, None), DisplayState::Skeleton);
    }

    #[test]
    fn test_select_empty_and_populated() {
        let repos = vec![repo("a"), repo("b")];

        assert_eq!(DisplayState::select(false, Some(&[][..])), DisplayState::Empty);
        assert_eq!(
            DisplayState::select(false, Some(&repos[..])),
            DisplayState::Populated(&repos[..])
        );
    }

    #[test]
    fn test_snapshot_display_state() {
        let snapshot = FeedSnapshot {
            loading: false,
            repositories: Some(Arc::new(vec![repo("a")])),
        };
        assert!(!snapshot.display_state().is_skeleton());

        let loading = FeedSnapshot {
            loading: true,
            ..snapshot
        };
        assert!(loading.display_state().is_skeleton());
    }
}
