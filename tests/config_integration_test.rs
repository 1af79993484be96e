use aximoix_client::config::{TomlConfig, DEPLOYED_API_URL, LOCAL_API_URL};
use aximoix_client::utils::validation::Validate;
use aximoix_client::{CliConfig, SubmissionPolicy, UnknownServicePolicy};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_flags_override_config_file() {
    let file = config_file(
        r#"
        [client]
        base_url = "http://127.0.0.1:8100/api"
        timeout_seconds = 11
        unknown_service = "not_found"
        submission = "demo_mode"
        "#,
    );
    let path = file.path().to_str().unwrap();

    let from_file = CliConfig::try_parse_from(["aximoix", "--config", path, "services"])
        .unwrap()
        .to_client_config()
        .unwrap();
    assert_eq!(from_file.base_url.as_str(), "http://127.0.0.1:8100/api");
    assert_eq!(from_file.timeout, Duration::from_secs(11));
    assert_eq!(from_file.unknown_service, UnknownServicePolicy::NotFound);
    assert_eq!(from_file.submission, SubmissionPolicy::DemoMode);

    let overridden = CliConfig::try_parse_from([
        "aximoix",
        "--config",
        path,
        "--base-url",
        "https://api.example.com/api",
        "--timeout-secs",
        "14",
        "--unknown-service",
        "default_service",
        "services",
    ])
    .unwrap()
    .to_client_config()
    .unwrap();
    assert_eq!(overridden.base_url.as_str(), "https://api.example.com/api");
    assert_eq!(overridden.timeout, Duration::from_secs(14));
    assert_eq!(overridden.unknown_service, UnknownServicePolicy::DefaultService);
    assert_eq!(overridden.submission, SubmissionPolicy::DemoMode);
}

#[test]
fn test_host_flag_does_not_replace_file_base_url() {
    let file = config_file("[client]\nbase_url = \"https://override.example.com/api\"\n");
    let path = file.path().to_str().unwrap();

    let config = CliConfig::try_parse_from([
        "aximoix",
        "--config",
        path,
        "--host",
        "localhost",
        "company",
    ])
    .unwrap()
    .to_client_config()
    .unwrap();
    assert_eq!(config.base_url.as_str(), "https://override.example.com/api");

    let file = config_file("[client]\nhost = \"aximoix.com\"\n");
    let path = file.path().to_str().unwrap();
    let config = CliConfig::try_parse_from([
        "aximoix",
        "--config",
        path,
        "--host",
        "localhost",
        "company",
    ])
    .unwrap()
    .to_client_config()
    .unwrap();
    assert_eq!(config.base_url.as_str(), LOCAL_API_URL);
}

#[test]
fn test_public_host_resolves_to_deployed_api() {
    let file = config_file("[client]\nhost = \"aximoix.com\"\n");
    let config = TomlConfig::from_file(file.path()).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(
        config.to_client_config().unwrap().base_url.as_str(),
        DEPLOYED_API_URL
    );
}

#[test]
fn test_missing_config_file_is_io_error() {
    let cli = CliConfig::try_parse_from([
        "aximoix",
        "--config",
        "/definitely/not/here.toml",
        "company",
    ])
    .unwrap();

    let err = cli.to_client_config().unwrap_err();
    assert!(matches!(err, aximoix_client::ClientError::IoError(_)));
    assert!(!err.recovery_suggestion().is_empty());
}
