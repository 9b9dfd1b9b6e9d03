//! Recent print-job history
//!
//! Bounded ring of dispatch records for diagnostics. Payloads are not
//! retained, only their size.

use crate::types::{DispatchOutcome, PrintJob, RawType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 100;

/// Final state of one dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Sent,
    Rejected,
    Offline,
    Failed,
}

impl JobStatus {
    fn from_outcome(outcome: &DispatchOutcome) -> Self {
        if outcome.successful {
            Self::Sent
        } else if outcome.agent_offline {
            Self::Offline
        } else if outcome.status.is_some() {
            Self::Rejected
        } else {
            Self::Failed
        }
    }
}

/// One recorded dispatch
#[derive(Debug, Clone, Serialize)]
pub struct PrintRecord {
    pub id: Uuid,
    pub printer: String,
    pub raw_type: RawType,
    pub status: JobStatus,
    /// Base64 payload length in characters
    pub size: usize,
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

/// Bounded in-memory history of dispatches
#[derive(Debug, Clone)]
pub struct PrintHistory {
    inner: Arc<RwLock<VecDeque<PrintRecord>>>,
    capacity: usize,
}

impl PrintHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity below one is clamped to one
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Record one dispatch, evicting the oldest entry at capacity
    pub async fn record(&self, job: &PrintJob, outcome: &DispatchOutcome) -> Uuid {
        let record = PrintRecord {
            id: Uuid::new_v4(),
            printer: job.printer_name.clone(),
            raw_type: job.raw_type,
            status: JobStatus::from_outcome(outcome),
            size: job.raw_data.len(),
            error: outcome.error.clone(),
            at: Utc::now(),
        };
        let id = record.id;

        let mut inner = self.inner.write().await;
        while inner.len() >= self.capacity.max(1) {
            inner.pop_front();
        }
        inner.push_back(record);
        id
    }

    /// Most recent records, newest first
    pub async fn recent(&self, n: usize) -> Vec<PrintRecord> {
        let inner = self.inner.read().await;
        inner.iter().rev().take(n).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl Default for PrintHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(printer: &str) -> PrintJob {
        PrintJob {
            printer_name: printer.to_string(),
            raw_type: RawType::Text,
            raw_data: "aGVsbG8=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_and_recent() {
        let history = PrintHistory::new();
        history.record(&job("A"), &DispatchOutcome::accepted(200)).await;
        history.record(&job("B"), &DispatchOutcome::rejected(500)).await;

        let recent = history.recent(10).await;
        assert_eq!(recent.len(), 2);
        // newest first
        assert_eq!(recent[0].printer, "B");
        assert_eq!(recent[0].status, JobStatus::Rejected);
        assert_eq!(recent[1].status, JobStatus::Sent);
        assert!(recent[0].error.is_some());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let history = PrintHistory::with_capacity(2);
        history.record(&job("A"), &DispatchOutcome::accepted(200)).await;
        history.record(&job("B"), &DispatchOutcome::accepted(200)).await;
        history.record(&job("C"), &DispatchOutcome::accepted(200)).await;

        assert_eq!(history.len().await, 2);
        let recent = history.recent(10).await;
        assert_eq!(recent[0].printer, "C");
        assert_eq!(recent[1].printer, "B");
    }

    #[tokio::test]
    async fn test_zero_capacity_stays_bounded() {
        let history = PrintHistory::with_capacity(0);
        for _ in 0..5 {
            history.record(&job("A"), &DispatchOutcome::accepted(200)).await;
        }
        assert_eq!(history.len().await, 1);
    }

    #[tokio::test]
    async fn test_status_classification() {
        let history = PrintHistory::new();
        history.record(&job("A"), &DispatchOutcome::offline("refused")).await;
        history
            .record(&job("B"), &DispatchOutcome::failed("body error"))
            .await;

        let recent = history.recent(2).await;
        assert_eq!(recent[1].status, JobStatus::Offline);
        assert_eq!(recent[0].status, JobStatus::Failed);
    }
}
