use super::retry::{retry_with_backoff, RetryPolicy};
use super::{NarrativeSummary, SummaryRequest};
use crate::config::SummaryConfig;
use crate::errors::{SummaryError, SummaryResult};
use std::time::Duration;
use tracing::{info, warn};

/// HTTP client for the narrative summary service
///
/// Posts a [`SummaryRequest`] as JSON and expects a [`NarrativeSummary`] back.
/// Transient failures are retried with exponential backoff.
pub struct SummaryClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    policy: RetryPolicy,
}

impl SummaryClient {
    pub fn new(config: &SummaryConfig) -> SummaryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SummaryError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim().to_string(),
            api_key: config.api_key.clone(),
            policy: RetryPolicy::from_config(config),
        })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }

    /// Summarise a table; never fails
    ///
    /// Errors are logged and replaced by a placeholder carrying the error's
    /// user-facing message, with `degraded` set.
    pub async fn summarise(&self, request: &SummaryRequest) -> NarrativeSummary {
        match self.try_summarise(request).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary unavailable for '{}': {}", request.table_name, e);
                NarrativeSummary::placeholder(&e.user_message())
            }
        }
    }

    /// Summarise a table, surfacing the failure
    pub async fn try_summarise(
        &self,
        request: &SummaryRequest,
    ) -> SummaryResult<NarrativeSummary> {
        if !self.is_enabled() {
            return Err(SummaryError::NotConfigured);
        }

        info!(
            "Requesting summary for '{}' ({} rows)",
            request.table_name,
            request.rows.len()
        );
        retry_with_backoff(&self.policy, || self.send_once(request)).await
    }

    async fn send_once(&self, request: &SummaryRequest) -> SummaryResult<NarrativeSummary> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SummaryError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return response
                .json::<NarrativeSummary>()
                .await
                .map_err(|e| SummaryError::InvalidResponse(e.to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        Err(SummaryError::from_status(status, message.clone())
            .unwrap_or(SummaryError::Rejected { status, message }))
    }
}
