#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::core::fallback::UnknownServicePolicy;
use crate::core::submission::SubmissionPolicy;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use std::time::Duration;
use url::Url;

pub const LOCAL_API_URL: &str = "http://localhost:8000/api";
pub const DEPLOYED_API_URL: &str = "https://aximoixwebsitemain.vercel.app/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const HEALTH_TIMEOUT_SECS: u64 = 10;
pub const MAX_TIMEOUT_SECS: u64 = 60;

pub const API_URL_ENV: &str = "AXIMOIX_API_URL";
pub const HOST_ENV: &str = "AXIMOIX_HOST";

/// Explicit client settings. Built once at startup and handed to the client;
/// request code never reads the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub unknown_service: UnknownServicePolicy,
    pub submission: SubmissionPolicy,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            unknown_service: UnknownServicePolicy::default(),
            submission: SubmissionPolicy::default(),
        })
    }

    /// Local hosts talk to the dev server, everything else to the deployed
    /// API. An explicit override wins over both.
    pub fn resolve(hostname: Option<&str>, api_override: Option<&str>) -> Result<Self> {
        Self::new(&resolve_base_url(hostname, api_override))
    }

    pub fn from_env() -> Result<Self> {
        let api_override = std::env::var(API_URL_ENV).ok();
        let hostname = std::env::var(HOST_ENV).ok();
        Self::resolve(hostname.as_deref(), api_override.as_deref())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_unknown_service_policy(mut self, policy: UnknownServicePolicy) -> Self {
        self.unknown_service = policy;
        self
    }

    pub fn with_submission_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.submission = policy;
        self
    }

    /// Base URL plus a resource suffix such as `/services/2`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", self.base_url.as_str())?;
        validate_range(
            "timeout_seconds",
            self.timeout.as_secs_f64(),
            0.001,
            MAX_TIMEOUT_SECS as f64,
        )?;
        Ok(())
    }
}

pub fn resolve_base_url(hostname: Option<&str>, api_override: Option<&str>) -> String {
    if let Some(url) = api_override.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    match hostname {
        Some("localhost") | Some("127.0.0.1") => LOCAL_API_URL.to_string(),
        _ => DEPLOYED_API_URL.to_string(),
    }
}
