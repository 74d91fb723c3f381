//! Shared test harness for E2E integration tests.
//!
//! Wires the grounded engine into a console session and drives the shell
//! loop over in-memory I/O, exercising real code paths across all crate
//! boundaries.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;

use oc_console::session::Session;
use oc_console::shell;
use oc_console::ConsoleConfig;
use oc_engine::{EngineConfig, GroundedEngine};
use oc_protocol::Answer;

/// Thinking delay used by shell scenarios (time is paused in those tests).
pub const DELAY: Duration = Duration::from_millis(600);

/// Every query the dashboard's canned prompts produce, one per intent path.
pub const CANNED_QUERIES: &[&str] = &[
    "Where is shipment TR-1241?",
    "TR-1242 status",
    "Has TR-1243 arrived?",
    "TR-1244",
    "status of TR-9999",
    "How did we do in Jan?",
    "February inventory",
    "Show me March",
    "apr",
    "May results",
    "june",
    "Jul",
    "august forecast",
    "Sep",
    "How is Apex Metals performing?",
    "Borealis Components details",
    "delta polymers",
    "Cobalt Freight Partners",
    "Who is our best supplier?",
    "Any vendor concerns?",
    "Logistics overview",
    "Any weather delays in transit?",
    "Sales overview",
    "What is the sales trend?",
    "Show the forecast",
    "Inventory status",
    "Any stock alerts?",
    "Security audit results",
    "Guardrail status",
    "What is the silver price today?",
    "Latest commodity news",
];

/// Engine plus console plumbing under test.
pub struct TestHarness {
    pub engine: GroundedEngine,
}

impl TestHarness {
    /// Harness over the compiled-in snapshot with default settings.
    pub fn with_sample_data() -> Self {
        Self {
            engine: GroundedEngine::with_sample_data(),
        }
    }

    /// Harness built from a console TOML document, the way the binary does it.
    pub fn from_toml(toml: &str) -> Self {
        let config: ConsoleConfig = toml::from_str(toml).unwrap();
        Self::with_engine_config(&config.engine)
    }

    pub fn with_engine_config(config: &EngineConfig) -> Self {
        Self {
            engine: GroundedEngine::from_config(config).unwrap(),
        }
    }

    pub fn ask(&self, query: &str) -> Answer {
        self.engine.submit_query(query)
    }

    /// Evidence of an answer as the dashboard receives it: parsed from JSON text.
    pub fn evidence_of(&self, query: &str) -> Value {
        let answer = self.ask(query);
        serde_json::from_str(&answer.evidence_json()).unwrap()
    }

    pub fn session(&self, reveal_evidence: bool) -> Session {
        Session::new(Box::new(self.engine.clone()), reveal_evidence)
    }
}

/// Run the shell over a fixed script and collect its stdout.
pub async fn run_script(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    shell::run(session, script.as_bytes(), &mut out, DELAY)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}
