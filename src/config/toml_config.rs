use crate::config::{resolve_base_url, ClientConfig, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::core::fallback::UnknownServicePolicy;
use crate::core::submission::SubmissionPolicy;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_range, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub client: Option<ClientSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub host: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub unknown_service: Option<UnknownServicePolicy>,
    pub submission: Option<SubmissionPolicy>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AXIMOIX_API_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static VAR: OnceLock<Regex> = OnceLock::new();
        let re = VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn client_section(&self) -> Result<&ClientSection> {
        validate_required_field("client", &self.client)
    }

    /// Resolve into the runtime config.
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        self.validate()?;
        let section = self.client_section()?;

        let config = ClientConfig::new(&resolve_base_url(
            section.host.as_deref(),
            section.base_url_override(),
        ))?
            .with_timeout(Duration::from_secs(
                section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .with_unknown_service_policy(section.unknown_service.unwrap_or_default())
            .with_submission_policy(section.submission.unwrap_or_default());

        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let section = self.client_section()?;
        if let Some(timeout) = section.timeout_seconds {
            validate_range("client.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECS)?;
        }
        Ok(())
    }
}

impl ClientSection {
    /// The explicit `base_url`. One still holding an unresolved `${VAR}`
    /// counts as unset.
    pub fn base_url_override(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.contains("${"))
    }
}
