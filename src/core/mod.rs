pub mod client;
pub mod envelope;
pub mod fallback;
pub mod orchestrator;
pub mod site;
pub mod submission;

pub use crate::domain::model::{
    CompanyInfo, ContactReceipt, ContactSubmission, HealthStatus, Service, ServiceDetail,
};
pub use crate::domain::ports::{Endpoint, FallbackProvider, ResourceFetcher};
pub use crate::utils::error::{ApiError, ApiResult, Result};
