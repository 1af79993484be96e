pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::ClientConfig;

pub use crate::core::{
    client::ApiClient,
    envelope::Envelope,
    fallback::{StaticFallback, UnknownServicePolicy},
    orchestrator::{FetchState, ResourceView, ResourceWatch},
    site::SiteClient,
    submission::{SubmissionOutcome, SubmissionPolicy},
};
pub use crate::domain::resource::{
    CompanyRequest, ContactRequest, ResourceKind, ServiceDetailRequest, ServiceListRequest,
};
pub use crate::utils::error::{ApiError, ClientError, Result};
