//! Dashboard session state: one query in flight at a time, newest wins.
//!
//! ```text
//! Idle --submit--> Pending --complete--> Answered
//!                  Pending --submit----> Pending (previous ticket superseded)
//! Answered --submit--> Pending
//! ```

use thiserror::Error;
use uuid::Uuid;

use oc_engine::QueryEngine;
use oc_protocol::{QueryEnvelope, QueryResponse, QueryStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("ticket {ticket} is no longer pending ({status:?})")]
    StaleTicket { ticket: Uuid, status: QueryStatus },
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Pending { envelope: QueryEnvelope },
    Answered { response: QueryResponse },
}

/// UI-side session around a query engine.
pub struct Session {
    engine: Box<dyn QueryEngine>,
    state: SessionState,
    reveal_evidence: bool,
}

impl Session {
    pub fn new(engine: Box<dyn QueryEngine>, reveal_evidence: bool) -> Self {
        Self {
            engine,
            state: SessionState::Idle,
            reveal_evidence,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending { .. })
    }

    pub fn reveal_evidence(&self) -> bool {
        self.reveal_evidence
    }

    /// Flip the evidence panel; returns the new setting.
    pub fn toggle_evidence(&mut self) -> bool {
        self.reveal_evidence = !self.reveal_evidence;
        tracing::debug!(reveal_evidence = self.reveal_evidence, "evidence toggled");
        self.reveal_evidence
    }

    /// Most recent delivered answer, if the session is showing one.
    pub fn last_response(&self) -> Option<&QueryResponse> {
        match &self.state {
            SessionState::Answered { response } => Some(response),
            _ => None,
        }
    }

    /// Where a ticket issued by this session stands. A ticket that is neither
    /// pending nor the one on display was replaced by a later submission.
    pub fn ticket_status(&self, ticket: Uuid) -> QueryStatus {
        match &self.state {
            SessionState::Pending { envelope } if envelope.id == ticket => QueryStatus::Pending,
            SessionState::Answered { response } if response.query_id == ticket => {
                QueryStatus::Answered
            }
            _ => QueryStatus::Superseded,
        }
    }

    /// Queue a query and return its ticket. Whitespace-only text never
    /// reaches the engine.
    pub fn submit(&mut self, text: &str) -> Result<Uuid, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        if let SessionState::Pending { envelope } = &self.state {
            tracing::debug!(superseded = %envelope.id, "pending query superseded");
        }

        let envelope = QueryEnvelope::new(text);
        let ticket = envelope.id;
        tracing::debug!(%ticket, "query pending");
        self.state = SessionState::Pending { envelope };
        Ok(ticket)
    }

    /// Answer the pending query if `ticket` is still the newest one.
    pub fn complete(&mut self, ticket: Uuid) -> Result<QueryResponse, SessionError> {
        let envelope = match (&self.state, self.ticket_status(ticket)) {
            (SessionState::Pending { envelope }, QueryStatus::Pending) => envelope.clone(),
            (_, status) => return Err(SessionError::StaleTicket { ticket, status }),
        };

        let answer = self.engine.answer(&envelope.text);
        let response = QueryResponse::answered(&envelope, answer);
        tracing::debug!(
            %ticket,
            engine = self.engine.engine_name(),
            topic = %response.answer.topic,
            latency_ms = response.latency_ms,
            "query answered"
        );

        self.state = SessionState::Answered {
            response: response.clone(),
        };
        Ok(response)
    }

    /// Text shown for a response under the current evidence setting.
    pub fn render(&self, response: &QueryResponse) -> String {
        render_response(response, self.reveal_evidence)
    }
}

pub fn render_response(response: &QueryResponse, reveal_evidence: bool) -> String {
    if reveal_evidence {
        format!(
            "{}\n{}",
            response.answer.sentence,
            response.answer.evidence_json()
        )
    } else {
        response.answer.sentence.clone()
    }
}
