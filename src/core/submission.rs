use crate::core::envelope::Envelope;
use crate::domain::model::{ContactReceipt, ContactSubmission};
use crate::domain::ports::{FallbackProvider, ResourceFetcher};
use crate::domain::resource::ContactRequest;
use crate::utils::error::ApiError;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// How a failed contact submission is reported back to the visitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum), value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPolicy {
    /// Report the failure as-is.
    #[default]
    SurfaceError,
    /// Acknowledge with the demo receipt and keep the failure for diagnostics.
    DemoMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Delivered(ContactReceipt),
    Rejected(ApiError),
    DemoMode {
        receipt: ContactReceipt,
        suppressed: ApiError,
    },
}

impl SubmissionOutcome {
    pub fn receipt(&self) -> Option<&ContactReceipt> {
        match self {
            SubmissionOutcome::Delivered(receipt) | SubmissionOutcome::DemoMode { receipt, .. } => {
                Some(receipt)
            }
            SubmissionOutcome::Rejected(_) => None,
        }
    }

    /// The underlying failure, whether surfaced or masked.
    pub fn failure(&self) -> Option<&ApiError> {
        match self {
            SubmissionOutcome::Delivered(_) => None,
            SubmissionOutcome::Rejected(e) | SubmissionOutcome::DemoMode { suppressed: e, .. } => {
                Some(e)
            }
        }
    }

    pub fn into_envelope(self) -> Envelope<ContactReceipt> {
        match self {
            SubmissionOutcome::Delivered(receipt) | SubmissionOutcome::DemoMode { receipt, .. } => {
                Envelope::success(receipt)
            }
            SubmissionOutcome::Rejected(e) => Envelope::from(e),
        }
    }
}

/// Posts the form once. A cancelled call is always `Rejected`, never masked.
pub async fn submit_contact<F: ResourceFetcher>(
    fetcher: &F,
    fallback: &dyn FallbackProvider,
    submission: &ContactSubmission,
    policy: SubmissionPolicy,
    cancel: &CancellationToken,
) -> SubmissionOutcome {
    tracing::info!("📧 Submitting contact form");
    let request = ContactRequest::new(submission.clone());

    match fetcher.fetch(&request, cancel).await {
        Ok(receipt) => SubmissionOutcome::Delivered(receipt),
        Err(e) if e.is_cancelled() => SubmissionOutcome::Rejected(e),
        Err(e) => match policy {
            SubmissionPolicy::SurfaceError => SubmissionOutcome::Rejected(e),
            SubmissionPolicy::DemoMode => {
                tracing::warn!("📋 Contact submission failed, answering in demo mode: {}", e);
                SubmissionOutcome::DemoMode {
                    receipt: fallback.contact_receipt(),
                    suppressed: e,
                }
            }
        },
    }
}
