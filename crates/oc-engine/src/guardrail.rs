//! Query guardrail: refuses prompt-override attempts and off-topic requests
//! before any intent matching happens.
//!
//! Matching is a case-insensitive substring test against fixed deny lists.
//! Prompt-override terms are checked first so an attempt that also mentions
//! an off-topic subject is reported as an override.

use oc_protocol::{Evidence, EvidenceRecord, RefusalCategory};

/// Fixed sentence returned for every refused query.
pub const REFUSAL_MESSAGE: &str = "I can only answer questions about this dashboard's \
supply-chain data, and my operating instructions cannot be changed from chat. \
Try asking about sales, inventory, shipments, suppliers, or security audits.";

/// Phrases that try to override, extract or escape the assistant's instructions.
pub const PROMPT_OVERRIDE_TERMS: &[&str] = &[
    "ignore previous",
    "ignore all previous",
    "ignore the above",
    "disregard previous",
    "system prompt",
    "system role",
    "you are now a",
    "bypass",
    "reveal your secret",
    "reveal your hidden",
    "jailbreak",
    "sudo",
    "execute",
    "output as json only",
    "output as json format",
    "output in json only",
    "output in json format",
];

/// Requests that have nothing to do with supply-chain operations.
pub const OFF_TOPIC_TERMS: &[&str] = &[
    "write code",
    "write a program",
    "python",
    "javascript",
    "tell me a joke",
    "joke",
    "poem",
    "trivia",
    "recipe",
    "horoscope",
    "capital of",
];

/// A refused query: which list matched and on what term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refusal {
    pub category: RefusalCategory,
    pub matched_term: String,
}

impl Refusal {
    pub fn sentence(&self) -> &'static str {
        REFUSAL_MESSAGE
    }

    pub fn evidence(&self) -> EvidenceRecord {
        EvidenceRecord::new(Evidence::Refusal {
            blocked: true,
            category: self.category,
            matched_term: self.matched_term.clone(),
        })
    }
}

/// Deny-list filter with optional operator-supplied terms.
#[derive(Debug, Clone, Default)]
pub struct Guardrail {
    extra_terms: Vec<String>,
}

impl Guardrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the off-topic list. Terms are lower-cased; blank terms are dropped.
    pub fn with_extra_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra_terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { extra_terms }
    }

    /// Returns `Some` when the query must be refused.
    pub fn filter(&self, query: &str) -> Option<Refusal> {
        let lower = query.to_lowercase();

        if let Some(term) = first_match(&lower, PROMPT_OVERRIDE_TERMS.iter().copied()) {
            return Some(Refusal {
                category: RefusalCategory::PromptOverride,
                matched_term: term.to_string(),
            });
        }

        first_match(
            &lower,
            OFF_TOPIC_TERMS
                .iter()
                .copied()
                .chain(self.extra_terms.iter().map(String::as_str)),
        )
        .map(|term| Refusal {
            category: RefusalCategory::OffTopic,
            matched_term: term.to_string(),
        })
    }
}

/// Filter with the built-in deny lists only.
pub fn filter(query: &str) -> Option<Refusal> {
    Guardrail::new().filter(query)
}

fn first_match<'a>(text: &str, mut terms: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    terms.find(|term| text.contains(term))
}
