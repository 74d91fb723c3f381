use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evidence::EvidenceRecord;
use crate::intent::Topic;

/// Engine output for one query: the sentence shown to the operator and the
/// evidence that justifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub topic: Topic,
    pub sentence: String,
    pub evidence: EvidenceRecord,
    /// False when the composed sentence failed verification and was withheld.
    pub grounded: bool,
}

impl Answer {
    /// Evidence rendered for the dashboard's "show source data" panel.
    pub fn evidence_json(&self) -> String {
        self.evidence
            .to_json_pretty()
            .unwrap_or_else(|_| "{}".to_string())
    }
}

/// Envelope wrapping a query submitted from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    /// Ticket ID (UUIDv7 for time-sortability). Used to discard stale answers.
    pub id: Uuid,
    /// Raw operator text, unmodified.
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

impl QueryEnvelope {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// Lifecycle status of a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Pending,
    Answered,
    /// A newer query was submitted before this one was answered.
    Superseded,
}

/// Answer delivered back to the dashboard for a specific envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query_id: Uuid,
    pub status: QueryStatus,
    pub answer: Answer,
    /// Wall-clock time from submission to delivery, including the display delay.
    pub latency_ms: u64,
    pub responded_at: DateTime<Utc>,
}

impl QueryResponse {
    pub fn answered(envelope: &QueryEnvelope, answer: Answer) -> Self {
        let responded_at = Utc::now();
        let latency_ms = (responded_at - envelope.submitted_at)
            .num_milliseconds()
            .max(0) as u64;
        Self {
            query_id: envelope.id,
            status: QueryStatus::Answered,
            answer,
            latency_ms,
            responded_at,
        }
    }
}
