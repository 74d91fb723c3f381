//! OmniChain grounded query engine.
//!
//! Answers operator questions from a static in-memory snapshot of
//! supply-chain records. Every answer pairs a sentence with the evidence
//! slice it was rendered from:
//!
//! guardrail -> resolver -> composer -> verify

pub mod composer;
pub mod config;
pub mod engine;
pub mod error;
pub mod guardrail;
pub mod resolver;
pub mod sample;
pub mod snapshot;
pub mod verify;

pub use composer::Composer;
pub use config::EngineConfig;
pub use engine::{GroundedEngine, QueryEngine};
pub use error::{ConfigError, GroundingError};
pub use guardrail::{Guardrail, Refusal};
pub use snapshot::{Computed, Snapshot};
