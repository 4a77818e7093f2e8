// src/services/analytics.rs
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::AnalyticsConfig;

pub const CLICK_PROJECT_ACTION: &str = "Click project";

const GA_COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";
const SERVER_CLIENT_ID: &str = "folio.server";

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid analytics event: {0}")]
    InvalidEvent(String),

    #[error("Analytics not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to encode analytics event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Analytics dispatch failed: {0}")]
    Dispatch(String),

    #[error("Analytics panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub params: BTreeMap<String, String>,
}

impl AnalyticsEvent {
    pub fn new(action: &str, params: BTreeMap<String, String>) -> Result<Self, AnalyticsError> {
        if action.trim().is_empty() {
            return Err(AnalyticsError::InvalidEvent("action cannot be empty".to_string()));
        }

        Ok(Self {
            action: action.to_string(),
            params,
        })
    }

    /// `{action, params: {project: <name>}}`
    pub fn for_project(action: &str, project: &str) -> Result<Self, AnalyticsError> {
        let mut params = BTreeMap::new();
        params.insert("project".to_string(), project.to_string());
        Self::new(action, params)
    }

    #[cfg(test)]
    pub fn click_project(project: &str) -> Result<Self, AnalyticsError> {
        Self::for_project(CLICK_PROJECT_ACTION, project)
    }
}

/// An analytics sink. `dispatch` must return without waiting on the network.
pub trait Analytics: Send + Sync {
    fn dispatch(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Outcome of an analytics attempt that is never allowed to fail its caller.
///
/// The only way to consume it is [`BestEffort::settle`], which logs a failure
/// and drops it.
#[must_use = "a BestEffort must be settled"]
#[derive(Debug)]
pub struct BestEffort(Result<(), AnalyticsError>);

impl BestEffort {
    pub fn skipped() -> Self {
        BestEffort(Ok(()))
    }

    /// Runs `attempt`, capturing both returned errors and panics.
    pub fn capture<F>(attempt: F) -> Self
    where
        F: FnOnce() -> Result<(), AnalyticsError>,
    {
        match catch_unwind(AssertUnwindSafe(attempt)) {
            Ok(result) => BestEffort(result),
            Err(payload) => BestEffort(Err(AnalyticsError::Panicked(panic_message(payload.as_ref())))),
        }
    }

    #[cfg(test)]
    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }

    pub fn settle(self) {
        if let Err(e) = self.0 {
            error!(error = %e, "Analytics event discarded");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[derive(Serialize)]
struct MeasurementPayload {
    client_id: &'static str,
    events: Vec<MeasurementEvent>,
}

#[derive(Serialize)]
struct MeasurementEvent {
    name: String,
    params: BTreeMap<String, String>,
}

/// Google Analytics 4 measurement protocol sender.
pub struct GoogleAnalytics {
    client: reqwest::Client,
    measurement_id: String,
    api_secret: Option<String>,
    endpoint: String,
}

impl GoogleAnalytics {
    pub fn new(config: &AnalyticsConfig) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        if config.api_secret.is_none() {
            warn!("GA_ID is set without GA_API_SECRET; analytics events will be dropped");
        }

        Ok(Self {
            client,
            measurement_id: config.id.clone(),
            api_secret: config.api_secret.clone(),
            endpoint: GA_COLLECT_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

impl Analytics for GoogleAnalytics {
    fn dispatch(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let api_secret = self
            .api_secret
            .as_deref()
            .ok_or_else(|| AnalyticsError::NotConfigured("GA_API_SECRET is not set".to_string()))?;

        let url = Url::parse_with_params(
            &self.endpoint,
            &[("measurement_id", self.measurement_id.as_str()), ("api_secret", api_secret)],
        )
        .map_err(|e| AnalyticsError::Dispatch(e.to_string()))?;

        let body = serde_json::to_vec(&MeasurementPayload {
            client_id: SERVER_CLIENT_ID,
            events: vec![MeasurementEvent {
                name: event.action,
                params: event.params,
            }],
        })?;

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AnalyticsError::Dispatch(e.to_string()))?;

        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        // Fire and forget
        runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Analytics event delivered");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "Analytics endpoint rejected event");
                }
                Err(e) => {
                    warn!(error = %e, "Analytics event not delivered");
                }
            }
        });

        Ok(())
    }
}
