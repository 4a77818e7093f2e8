// src/services/click.rs
use std::sync::Arc;
use tracing::debug;

use super::analytics::{Analytics, AnalyticsEvent, BestEffort, CLICK_PROJECT_ACTION};
use crate::models::RepositorySummary;

/// Browsing context for opened repositories.
pub const NEW_TAB: &str = "_blank";

pub trait Navigator {
    fn open(&mut self, url: &str, target: &str);
}

/// Records the navigation so a handler can answer with a redirect.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    location: Option<String>,
}

impl RedirectNavigator {
    pub fn into_location(self) -> Option<String> {
        self.location.filter(|url| !url.is_empty())
    }
}

impl Navigator for RedirectNavigator {
    fn open(&mut self, url: &str, target: &str) {
        debug!(url, browsing_context = target, "Opening repository");
        self.location = Some(url.to_string());
    }
}

#[derive(Clone)]
pub struct ClickHandler {
    analytics: Option<Arc<dyn Analytics>>,
    action: String,
}

impl Default for ClickHandler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ClickHandler {
    pub fn new(analytics: Option<Arc<dyn Analytics>>) -> Self {
        Self {
            analytics,
            action: CLICK_PROJECT_ACTION.to_string(),
        }
    }

    /// Overrides the event action, "Click project" by default.
    #[cfg(test)]
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    /// Emits the click event if analytics is enabled.
    pub fn track(&self, repo: &RepositorySummary) -> BestEffort {
        match &self.analytics {
            Some(analytics) => BestEffort::capture(|| {
                let event = AnalyticsEvent::for_project(&self.action, &repo.name)?;
                analytics.dispatch(event)
            }),
            None => BestEffort::skipped(),
        }
    }

    /// Tracks the click, then opens the clone URL whatever tracking did.
    pub fn click(&self, repo: &RepositorySummary, navigator: &mut dyn Navigator) {
        self.track(repo).settle();
        navigator.open(&repo.clone_url, NEW_TAB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::AnalyticsError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Vec<(String, String)>,
    }

    impl Navigator for RecordingNavigator {
        fn open(&mut self, url: &str, target: &str) {
            self.opened.push((url.to_string(), target.to_string()));
        }
    }

    #[derive(Default)]
    struct RecordingAnalytics {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl Analytics for RecordingAnalytics {
        fn dispatch(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    struct FailingAnalytics;

    impl Analytics for FailingAnalytics {
        fn dispatch(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Dispatch("collector unreachable".to_string()))
        }
    }

    struct PanickingAnalytics;

    impl Analytics for PanickingAnalytics {
        fn dispatch(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
            panic!("analytics exploded")
        }
    }

    fn repo() -> RepositorySummary {
        RepositorySummary {
            name: "gitprofile".to_string(),
            clone_url: "https://github.com/octocat/gitprofile.git".to_string(),
            ..Default::default()
        }
    }

    fn assert_opened_once(navigator: &RecordingNavigator) {
        assert_eq!(
            navigator.opened,
            vec![(
                "https://github.com/octocat/gitprofile.git".to_string(),
                NEW_TAB.to_string()
            )]
        );
    }

    #[test]
    fn test_click_without_analytics_navigates() {
        let handler = ClickHandler::new(None);
        let mut navigator = RecordingNavigator::default();

        handler.click(&repo(), &mut navigator);
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_click_emits_event_then_navigates() {
        let analytics = Arc::new(RecordingAnalytics::default());
        let handler = ClickHandler::new(Some(analytics.clone() as Arc<dyn Analytics>));
        let mut navigator = RecordingNavigator::default();

        handler.click(&repo(), &mut navigator);

        let events = analytics.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], AnalyticsEvent::click_project("gitprofile").unwrap());
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_analytics_error_does_not_block_navigation() {
        let handler = ClickHandler::new(Some(Arc::new(FailingAnalytics) as Arc<dyn Analytics>));
        let mut navigator = RecordingNavigator::default();

        assert!(!handler.track(&repo()).is_ok());
        handler.click(&repo(), &mut navigator);
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_analytics_panic_does_not_block_navigation() {
        let handler = ClickHandler::new(Some(Arc::new(PanickingAnalytics) as Arc<dyn Analytics>));
        let mut navigator = RecordingNavigator::default();

        handler.click(&repo(), &mut navigator);
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_unnamed_repository_still_tracked() {
        let analytics = Arc::new(RecordingAnalytics::default());
        let handler = ClickHandler::new(Some(analytics.clone() as Arc<dyn Analytics>));
        let mut navigator = RecordingNavigator::default();
        let mut unnamed = repo();
        unnamed.name = String::new();

        // The event still builds: only the action is required
        handler.click(&unnamed, &mut navigator);
        assert_eq!(analytics.events.lock().unwrap().len(), 1);
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_event_construction_error_does_not_block_navigation() {
        let analytics = Arc::new(RecordingAnalytics::default());
        let handler = ClickHandler::new(Some(analytics.clone() as Arc<dyn Analytics>)).with_action(" ");
        let mut navigator = RecordingNavigator::default();

        assert!(!handler.track(&repo()).is_ok());
        handler.click(&repo(), &mut navigator);
        assert!(analytics.events.lock().unwrap().is_empty());
        assert_opened_once(&navigator);
    }

    #[test]
    fn test_redirect_navigator_location() {
        let mut navigator = RedirectNavigator::default();
        navigator.open("https://github.com/a/b.git", NEW_TAB);
        assert_eq!(navigator.into_location().as_deref(), Some("https://github.com/a/b.git"));

        let mut empty = RedirectNavigator::default();
        empty.open("", NEW_TAB);
        assert_eq!(empty.into_location(), None);
        assert_eq!(RedirectNavigator::default().into_location(), None);
    }
}
