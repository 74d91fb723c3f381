//! Engine error types.

use thiserror::Error;

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("revenue multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),

    #[error("blocked term #{index} is empty")]
    EmptyBlockedTerm { index: usize },
}

/// A composed sentence states a figure its evidence cannot back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroundingError {
    #[error("figure {figure} does not appear in the evidence")]
    UngroundedFigure { figure: String },
}
