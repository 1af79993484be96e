use crate::domain::model::{CompanyInfo, ContactReceipt, Service};
use crate::domain::resource::ResourceKind;
use crate::utils::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// A single request the client knows how to issue. Equality doubles as the
/// dependency check: a watch only refetches when the endpoint value changes.
pub trait Endpoint: Clone + PartialEq + Debug + Send + Sync + 'static {
    type Output: DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    fn kind(&self) -> ResourceKind;

    fn method(&self) -> Method {
        Method::GET
    }

    /// Path suffix appended to the configured base URL.
    fn path(&self) -> String;

    fn body(&self) -> Option<serde_json::Value> {
        None
    }

    /// Substitute payload served when the live call fails. `None` means the
    /// provider has nothing for this request.
    fn fallback(&self, provider: &dyn FallbackProvider) -> Option<Self::Output>;
}

/// Static substitute data, shaped exactly like the live responses.
pub trait FallbackProvider: Send + Sync {
    fn company(&self) -> CompanyInfo;
    fn services(&self) -> Vec<Service>;
    fn service(&self, id: &str) -> Option<Service>;
    fn contact_receipt(&self) -> ContactReceipt;
}

/// Issues one request for an endpoint. `ApiClient` is the real
/// implementation; tests swap in scripted ones.
#[async_trait]
pub trait ResourceFetcher: Send + Sync + 'static {
    async fn fetch<E: Endpoint>(
        &self,
        endpoint: &E,
        cancel: &CancellationToken,
    ) -> std::result::Result<E::Output, ApiError>;
}
