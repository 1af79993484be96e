use crate::config::{
    resolve_base_url, ClientConfig, TomlConfig, API_URL_ENV, MAX_TIMEOUT_SECS,
};
use crate::core::fallback::UnknownServicePolicy;
use crate::domain::model::ContactSubmission;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "aximoix")]
#[command(about = "Fetch AximoIX site content with offline fallback")]
pub struct CliConfig {
    /// Explicit API base URL; wins over --host and the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Hostname the site is served from (localhost selects the dev API)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// TOML file with a [client] section
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true, value_enum)]
    pub unknown_service: Option<UnknownServicePolicy>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Company profile
    Company,
    /// Service list
    Services,
    /// One service with its detailed info
    Service { id: String },
    /// Submit the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        service_interest: String,
        #[arg(long)]
        message: String,
        /// Acknowledge with a demo receipt when the backend is unreachable
        #[arg(long)]
        demo_mode: bool,
    },
    /// Backend connection test
    Health,
}

impl Command {
    pub fn contact_submission(&self) -> Option<ContactSubmission> {
        match self {
            Command::Contact {
                name,
                email,
                service_interest,
                message,
                ..
            } => Some(ContactSubmission {
                name: name.clone(),
                email: email.clone(),
                service_interest: service_interest.clone(),
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

impl CliConfig {
    /// Layers, lowest first: environment (or the config file when given),
    /// then command-line flags.
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                let api_override = file.client_section()?.base_url_override();
                self.apply_flags(file.to_client_config()?, api_override)
            }
            None => {
                let api_override = std::env::var(API_URL_ENV).ok();
                self.apply_flags(ClientConfig::from_env()?, api_override.as_deref())
            }
        }
    }

    /// `--host` only replaces the hostname input. A base-URL override from
    /// the lower layer still beats it; only `--base-url` replaces that.
    fn apply_flags(
        &self,
        mut config: ClientConfig,
        lower_override: Option<&str>,
    ) -> Result<ClientConfig> {
        if self.base_url.is_some() || self.host.is_some() {
            let api_override = self.base_url.as_deref().or(lower_override);
            let url = resolve_base_url(self.host.as_deref(), api_override);
            config.base_url = ClientConfig::new(&url)?.base_url;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = self.unknown_service {
            config.unknown_service = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Checks the flags and the contact form only. The layered config is
/// validated when [`CliConfig::to_client_config`] builds it.
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(secs) = self.timeout_secs {
            validate_range("timeout_secs", secs, 1, MAX_TIMEOUT_SECS)?;
        }
        if let Some(submission) = self.command.contact_submission() {
            submission.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LOCAL_API_URL;

    #[test]
    fn test_parse_service_command_with_flags() {
        let cli = CliConfig::try_parse_from([
            "aximoix",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "--timeout-secs",
            "12",
            "service",
            "2",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Service { ref id } if id == "2"));
        let config = cli.to_client_config().unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_host_flag_selects_local_api() {
        let cli = CliConfig::try_parse_from(["aximoix", "--host", "localhost", "company"]).unwrap();
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(cli.to_client_config().unwrap().base_url.as_str(), LOCAL_API_URL);
        }
    }

    #[test]
    fn test_host_flag_keeps_lower_override() {
        let cli = CliConfig::try_parse_from(["aximoix", "--host", "localhost", "company"]).unwrap();
        let lower = ClientConfig::new("https://override.example.com/api").unwrap();

        let config = cli
            .apply_flags(lower.clone(), Some("https://override.example.com/api"))
            .unwrap();
        assert_eq!(config.base_url.as_str(), "https://override.example.com/api");

        let config = cli.apply_flags(lower, None).unwrap();
        assert_eq!(config.base_url.as_str(), LOCAL_API_URL);
    }

    #[test]
    fn test_base_url_flag_beats_lower_override() {
        let cli = CliConfig::try_parse_from([
            "aximoix",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "--host",
            "aximoix.com",
            "company",
        ])
        .unwrap();
        let lower = ClientConfig::new("https://override.example.com/api").unwrap();

        let config = cli
            .apply_flags(lower, Some("https://override.example.com/api"))
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_policy_values_use_config_file_spelling() {
        let cli = CliConfig::try_parse_from([
            "aximoix",
            "--unknown-service",
            "not_found",
            "company",
        ])
        .unwrap();
        assert_eq!(cli.unknown_service, Some(UnknownServicePolicy::NotFound));

        assert!(CliConfig::try_parse_from([
            "aximoix",
            "--unknown-service",
            "not-found",
            "company",
        ])
        .is_err());
    }

    #[test]
    fn test_contact_validation() {
        let cli = CliConfig::try_parse_from([
            "aximoix",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "contact",
            "--name",
            "A",
            "--email",
            "not-an-email",
            "--message",
            "hi",
        ])
        .unwrap();
        assert!(cli.validate().is_err());

        let submission = cli.command.contact_submission().unwrap();
        assert_eq!(submission.service_interest, "");
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        let cli = CliConfig::try_parse_from([
            "aximoix",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "--timeout-secs",
            "0",
            "health",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }
}
