//! Query pipeline: guardrail, then intent resolution, then composition, then
//! verification of the composed sentence against its evidence.

use oc_protocol::{Answer, Intent, Topic};

use crate::composer::Composer;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::guardrail::Guardrail;
use crate::resolver::resolve_traced;
use crate::sample::sample_snapshot_with_threshold;
use crate::snapshot::Snapshot;
use crate::verify::check_grounded;

/// Sentence shown in place of an answer that failed verification.
pub const WITHHELD_MESSAGE: &str = "I couldn't verify every figure in that answer against \
the dashboard data, so I've withheld it. The evidence panel shows the records I used.";

/// Anything that turns operator text into a grounded answer.
pub trait QueryEngine: Send + Sync {
    /// Answer one query. Never fails: refusals and misses are answers too.
    fn answer(&self, query: &str) -> Answer;

    /// Name of this engine (for logging).
    fn engine_name(&self) -> &str;
}

/// Deterministic engine over a fixed snapshot.
#[derive(Debug, Clone)]
pub struct GroundedEngine {
    snapshot: Snapshot,
    guardrail: Guardrail,
    composer: Composer,
}

impl GroundedEngine {
    pub fn new(snapshot: Snapshot, config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            snapshot,
            guardrail: Guardrail::with_extra_terms(&config.extra_blocked_terms),
            composer: Composer::new(config.revenue_multiplier),
        })
    }

    /// Engine over the compiled-in dashboard snapshot.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::new(
            sample_snapshot_with_threshold(config.low_inventory_threshold),
            config,
        )
    }

    /// Engine over the compiled-in snapshot with default settings.
    pub fn with_sample_data() -> Self {
        let config = EngineConfig::default();
        Self {
            snapshot: sample_snapshot_with_threshold(config.low_inventory_threshold),
            guardrail: Guardrail::new(),
            composer: Composer::new(config.revenue_multiplier),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn submit_query(&self, query: &str) -> Answer {
        if let Some(refusal) = self.guardrail.filter(query) {
            tracing::info!(
                category = ?refusal.category,
                term = %refusal.matched_term,
                "query refused"
            );
            return Answer {
                topic: Topic::Refusal,
                sentence: refusal.sentence().to_string(),
                evidence: refusal.evidence(),
                grounded: true,
            };
        }

        let resolution = resolve_traced(query, &self.snapshot);
        tracing::debug!(
            rule = resolution.rule.unwrap_or("fallback"),
            topic = %resolution.intent.topic(),
            "intent resolved"
        );

        self.render(&resolution.intent)
    }

    fn render(&self, intent: &Intent) -> Answer {
        let (sentence, evidence) = self.composer.compose(intent, &self.snapshot);
        let topic = intent.topic();

        match check_grounded(&sentence, &evidence) {
            Ok(()) => Answer {
                topic,
                sentence,
                evidence,
                grounded: true,
            },
            Err(e) => {
                tracing::warn!(%topic, error = %e, "answer withheld");
                Answer {
                    topic,
                    sentence: WITHHELD_MESSAGE.to_string(),
                    evidence,
                    grounded: false,
                }
            }
        }
    }
}

impl QueryEngine for GroundedEngine {
    fn answer(&self, query: &str) -> Answer {
        self.submit_query(query)
    }

    fn engine_name(&self) -> &str {
        "grounded"
    }
}
