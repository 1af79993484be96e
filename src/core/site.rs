use crate::config::ClientConfig;
use crate::core::client::ApiClient;
use crate::core::fallback::StaticFallback;
use crate::core::orchestrator::ResourceWatch;
use crate::core::submission::{submit_contact, SubmissionOutcome, SubmissionPolicy};
use crate::domain::model::{ContactSubmission, HealthStatus};
use crate::domain::ports::FallbackProvider;
use crate::domain::resource::{CompanyRequest, ServiceDetailRequest, ServiceListRequest};
use crate::utils::error::{ApiResult, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything the marketing pages need, wired once from a [`ClientConfig`].
#[derive(Clone)]
pub struct SiteClient {
    client: Arc<ApiClient>,
    fallback: Arc<dyn FallbackProvider>,
    submission: SubmissionPolicy,
}

impl SiteClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let fallback = Arc::new(StaticFallback::new(config.unknown_service));
        let submission = config.submission;
        Ok(Self {
            client: Arc::new(ApiClient::new(config)?),
            fallback,
            submission,
        })
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn company(&self) -> ResourceWatch<CompanyRequest> {
        ResourceWatch::observe(self.client.clone(), self.fallback.clone(), CompanyRequest)
    }

    pub fn services(&self) -> ResourceWatch<ServiceListRequest> {
        ResourceWatch::observe(self.client.clone(), self.fallback.clone(), ServiceListRequest)
    }

    pub fn service(&self, id: impl Into<String>) -> ResourceWatch<ServiceDetailRequest> {
        ResourceWatch::observe(
            self.client.clone(),
            self.fallback.clone(),
            ServiceDetailRequest::new(id),
        )
    }

    /// Submits with the configured policy.
    pub async fn submit_contact(
        &self,
        submission: &ContactSubmission,
        cancel: &CancellationToken,
    ) -> SubmissionOutcome {
        self.submit_contact_with(submission, self.submission, cancel).await
    }

    pub async fn submit_contact_with(
        &self,
        submission: &ContactSubmission,
        policy: SubmissionPolicy,
        cancel: &CancellationToken,
    ) -> SubmissionOutcome {
        submit_contact(
            self.client.as_ref(),
            self.fallback.as_ref(),
            submission,
            policy,
            cancel,
        )
        .await
    }

    pub async fn check_health(&self, cancel: &CancellationToken) -> ApiResult<HealthStatus> {
        self.client.check_health(cancel).await
    }
}
