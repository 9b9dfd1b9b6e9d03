//! Print agent dispatch
//!
//! Ships encoded jobs to the local print agent over HTTP. Every job is
//! at-most-once, fire-once: no retries, no queue. Failures come back as a
//! [`DispatchOutcome`] rather than an error so the caller can pick a local
//! fallback without unwinding the surrounding transaction.

use crate::encoder::JobEncoder;
use crate::error::{EngineResult, StatusError};
use crate::types::{AgentStatus, DispatchOutcome, PrintJob};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Connectivity probe timeout
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends print jobs to the local agent
#[derive(Debug, Clone)]
pub struct AgentDispatcher {
    client: Client,
    server_url: String,
    status_timeout: Duration,
}

impl AgentDispatcher {
    pub fn new(server_url: &str) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            status_timeout: STATUS_TIMEOUT,
        })
    }

    pub fn with_status_timeout(mut self, timeout: Duration) -> Self {
        self.status_timeout = timeout;
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Send one job to the agent's raw-print endpoint
    ///
    /// Success iff the response status is 2xx. A transport-level failure
    /// (connection refused, DNS, TLS) is classified as `agent_offline` so
    /// callers can distinguish a dead agent from a rejecting one.
    #[instrument(skip(self, job), fields(printer = %job.printer_name, raw_type = ?job.raw_type))]
    pub async fn send(&self, job: &PrintJob) -> DispatchOutcome {
        let url = format!("{}/print_raw", self.server_url);
        match self.client.post(&url).json(job).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    debug!(status = status.as_u16(), "agent accepted job");
                    DispatchOutcome::accepted(status.as_u16())
                } else {
                    warn!(status = status.as_u16(), "agent rejected job");
                    DispatchOutcome::rejected(status.as_u16())
                }
            }
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!(error = %e, "agent unreachable");
                DispatchOutcome::offline(e.to_string())
            }
            Err(e) => {
                warn!(error = %e, "dispatch failed");
                DispatchOutcome::failed(e.to_string())
            }
        }
    }

    /// Send an image job, then its standalone cut job
    ///
    /// The cut is issued only after the image job reports success; firing it
    /// earlier would sever the paper before the image finishes spooling. The
    /// returned outcome is the image job's, a failed cut is logged only.
    pub async fn send_image_then_cut(&self, image_job: &PrintJob) -> DispatchOutcome {
        let outcome = self.send(image_job).await;
        if !outcome.successful {
            return outcome;
        }

        let cut = JobEncoder::cut(&image_job.printer_name);
        let cut_outcome = self.send(&cut).await;
        if !cut_outcome.successful {
            warn!(
                printer = %image_job.printer_name,
                error = ?cut_outcome.error,
                "cut command after image was not accepted"
            );
        }
        outcome
    }

    /// Probe agent connectivity and capabilities
    pub async fn status(&self) -> Result<AgentStatus, StatusError> {
        let url = format!("{}/status", self.server_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.status_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StatusError::Timeout
                } else {
                    StatusError::Offline(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::Rejected(status.as_u16()));
        }

        response
            .json::<AgentStatus>()
            .await
            .map_err(|e| StatusError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_trailing_slash_trimmed() {
        let d = AgentDispatcher::new("http://127.0.0.1:9100/").unwrap();
        assert_eq!(d.server_url(), "http://127.0.0.1:9100");
    }

    #[tokio::test]
    async fn test_unreachable_agent_is_offline_not_error() {
        // no listener on this port
        let d = AgentDispatcher::new("http://127.0.0.1:1").unwrap();
        let job = JobEncoder::cut("Front");
        let outcome = d.send(&job).await;
        assert!(!outcome.successful);
        assert!(outcome.agent_offline);
        assert_eq!(outcome.status, None);
    }
}
