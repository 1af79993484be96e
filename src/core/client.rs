use crate::config::{ClientConfig, HEALTH_TIMEOUT_SECS};
use crate::domain::model::{CompanyInfo, ContactReceipt, ContactSubmission, HealthStatus, Service};
use crate::domain::ports::{Endpoint, ResourceFetcher};
use crate::domain::resource::{
    CompanyRequest, ContactRequest, ServiceDetailRequest, ServiceListRequest,
};
use crate::utils::error::{structured_detail, ApiError, ApiResult, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const HEALTH_FAILURE_MESSAGE: &str = "Cannot connect to backend server";

/// Thin wrapper over `reqwest::Client`: one attempt per call, bounded by the
/// configured timeout, no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get_company(&self, cancel: &CancellationToken) -> ApiResult<CompanyInfo> {
        self.fetch(&CompanyRequest, cancel).await
    }

    pub async fn get_services(&self, cancel: &CancellationToken) -> ApiResult<Vec<Service>> {
        self.fetch(&ServiceListRequest, cancel).await
    }

    pub async fn get_service(&self, id: &str, cancel: &CancellationToken) -> ApiResult<Service> {
        self.fetch(&ServiceDetailRequest::new(id), cancel).await
    }

    pub async fn post_contact(
        &self,
        submission: &ContactSubmission,
        cancel: &CancellationToken,
    ) -> ApiResult<ContactReceipt> {
        self.fetch(&ContactRequest::new(submission.clone()), cancel).await
    }

    /// Connection test against the backend's health route. Uses the shorter
    /// health timeout and a fixed failure message.
    pub async fn check_health(&self, cancel: &CancellationToken) -> ApiResult<HealthStatus> {
        let timeout = self
            .config
            .timeout
            .min(Duration::from_secs(HEALTH_TIMEOUT_SECS));

        match self
            .send::<HealthStatus>(Method::GET, "/health", None, timeout, cancel)
            .await
        {
            Ok(status) => Ok(status),
            Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
            Err(e) => {
                tracing::warn!("❌ Connection test failed: {}", e);
                Err(ApiError::Transport {
                    message: HEALTH_FAILURE_MESSAGE.to_string(),
                })
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> ApiResult<T> {
        let url = self.config.endpoint_url(path);
        tracing::debug!("🌐 {} {}", method, url);

        let mut request = self.client.request(method, &url).timeout(timeout);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let call = Self::execute::<T>(request, &url);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("🛑 {} cancelled by caller", url);
                Err(ApiError::Cancelled)
            }
            result = call => result,
        }
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} responded with {}", url, status);

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice::<T>(&bytes).map_err(|e| ApiError::Decode {
                message: e.to_string(),
            });
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let detail = serde_json::from_slice::<serde_json::Value>(&bytes)
            .ok()
            .and_then(|body| structured_detail(&body));
        Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl ResourceFetcher for ApiClient {
    async fn fetch<E: Endpoint>(
        &self,
        endpoint: &E,
        cancel: &CancellationToken,
    ) -> ApiResult<E::Output> {
        let result = self
            .send::<E::Output>(
                endpoint.method(),
                &endpoint.path(),
                endpoint.body(),
                self.config.timeout,
                cancel,
            )
            .await;

        match &result {
            Ok(_) => tracing::info!("✅ {} loaded", endpoint.kind()),
            Err(ApiError::Cancelled) => {}
            Err(e) => tracing::warn!("❌ Error fetching {}: {}", endpoint.kind(), e),
        }
        result
    }
}
