use aximoix_client::config::Command;
use aximoix_client::core::{ContactSubmission, Endpoint, HealthStatus};
use aximoix_client::utils::{error::ApiResult, logger, validation::Validate};
use aximoix_client::{
    CliConfig, ClientError, FetchState, ResourceWatch, SiteClient, SubmissionOutcome,
    SubmissionPolicy,
};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_FALLBACK: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting aximoix client");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        fail(&e);
    }

    let config = match cli.to_client_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::info!("🔧 API base URL: {}", config.base_url);

    let site = match SiteClient::new(config) {
        Ok(site) => site,
        Err(e) => fail(&e),
    };

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling request");
            interrupt.cancel();
        }
    });

    let code = match &cli.command {
        Command::Company => report(site.company(), &cancel).await?,
        Command::Services => report(site.services(), &cancel).await?,
        Command::Service { id } => report(site.service(id.clone()), &cancel).await?,
        Command::Contact {
            name,
            email,
            service_interest,
            message,
            demo_mode,
        } => {
            let submission = ContactSubmission {
                name: name.clone(),
                email: email.clone(),
                service_interest: service_interest.clone(),
                message: message.clone(),
            };
            let outcome = if *demo_mode {
                site.submit_contact_with(&submission, SubmissionPolicy::DemoMode, &cancel)
                    .await
            } else {
                site.submit_contact(&submission, &cancel).await
            };
            report_submission(outcome)?
        }
        Command::Health => {
            let result = site.check_health(&cancel).await;
            let code = health_exit_code(&result);
            match result {
                Ok(status) => print_json(&json!({"success": true, "data": status}))?,
                Err(e) if e.is_cancelled() => {}
                Err(e) => print_json(&json!({"success": false, "error": e.display_message()}))?,
            }
            code
        }
    };

    if code != EXIT_OK {
        std::process::exit(code);
    }
    Ok(())
}

fn fail(e: &ClientError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(EXIT_FAILED);
}

async fn report<E>(watch: ResourceWatch<E>, cancel: &CancellationToken) -> anyhow::Result<i32>
where
    E: Endpoint,
    E::Output: Serialize,
{
    let state = tokio::select! {
        state = watch.settled() => state,
        _ = cancel.cancelled() => {
            watch.close();
            return Ok(EXIT_INTERRUPTED);
        }
    };

    match state {
        FetchState::Loaded(data) => {
            print_json(&json!({"success": true, "data": data}))?;
            Ok(EXIT_OK)
        }
        FetchState::Failed { error, fallback } => {
            let message = error.display_message();
            match fallback {
                Some(fallback) => {
                    tracing::warn!("📋 Serving fallback content: {}", message);
                    print_json(&json!({"success": false, "error": message, "fallback": fallback}))?;
                    Ok(EXIT_FALLBACK)
                }
                None => {
                    print_json(&json!({"success": false, "error": message}))?;
                    Ok(EXIT_FAILED)
                }
            }
        }
        FetchState::Loading => Ok(EXIT_INTERRUPTED),
    }
}

fn report_submission(outcome: SubmissionOutcome) -> anyhow::Result<i32> {
    let code = submission_exit_code(&outcome);
    match &outcome {
        SubmissionOutcome::Rejected(e) if e.is_cancelled() => return Ok(code),
        SubmissionOutcome::DemoMode { suppressed, .. } => {
            tracing::warn!("Contact form answered in demo mode: {}", suppressed);
        }
        _ => {}
    }
    print_json(&outcome.into_envelope())?;
    Ok(code)
}

fn submission_exit_code(outcome: &SubmissionOutcome) -> i32 {
    match outcome {
        SubmissionOutcome::Delivered(_) => EXIT_OK,
        SubmissionOutcome::DemoMode { .. } => EXIT_FALLBACK,
        SubmissionOutcome::Rejected(e) if e.is_cancelled() => EXIT_INTERRUPTED,
        SubmissionOutcome::Rejected(_) => EXIT_FAILED,
    }
}

fn health_exit_code(result: &ApiResult<HealthStatus>) -> i32 {
    match result {
        Ok(_) => EXIT_OK,
        Err(e) if e.is_cancelled() => EXIT_INTERRUPTED,
        Err(_) => EXIT_FAILED,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
