//! Backend submission — one HTTP POST per completed record.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

/// Finalized submission payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub chat_id: String,
    pub has_license: bool,
}

/// Normalized result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Backend accepted the record (201).
    Submitted,
    /// Backend rejected the record as incomplete (400).
    RejectedMissingFields,
    /// Backend already has this user (409).
    RejectedDuplicate,
    /// Any other backend status.
    BackendError,
    /// The request never got a response.
    ConnectionError,
}

impl Outcome {
    /// Map a backend status code to an outcome.
    ///
    /// Total: every status not in the table folds into `BackendError`.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::CREATED => Self::Submitted,
            StatusCode::BAD_REQUEST => Self::RejectedMissingFields,
            StatusCode::CONFLICT => Self::RejectedDuplicate,
            _ => Self::BackendError,
        }
    }
}

/// Submits completed records to the backend.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Perform exactly one submission attempt. Failures are absorbed into
    /// the returned outcome, never surfaced as errors.
    async fn submit(&self, record: &Record) -> Outcome;
}

/// Submitter backed by an HTTP POST to the configured backend URL.
pub struct HttpSubmitter {
    backend_url: String,
    client: reqwest::Client,
}

impl HttpSubmitter {
    pub fn new(backend_url: String) -> Self {
        Self {
            backend_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, record: &Record) -> Outcome {
        let payload = serde_json::to_value(record).unwrap_or_default();
        tracing::info!(url = %self.backend_url, %payload, "Submitting record to backend");

        match self.client.post(&self.backend_url).json(record).send().await {
            Ok(resp) => {
                let status = resp.status();
                tracing::info!(%status, "Backend responded");
                Outcome::from_status(status)
            }
            Err(e) => {
                tracing::error!(url = %self.backend_url, "Backend request failed: {e}");
                Outcome::ConnectionError
            }
        }
    }
}
