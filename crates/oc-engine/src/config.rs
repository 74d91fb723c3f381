//! Engine configuration, deserializable from the `[engine]` table of the
//! console config file.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::snapshot::DEFAULT_LOW_INVENTORY_THRESHOLD;

/// Tunables for snapshot derivation, answer rendering and the guardrail.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Display-only conversion from total units sold to an estimated revenue.
    #[serde(default = "default_revenue_multiplier")]
    pub revenue_multiplier: f64,
    /// Months with inventory strictly below this are flagged as low stock.
    #[serde(default = "default_low_inventory_threshold")]
    pub low_inventory_threshold: u64,
    /// Additional deny-list terms, matched case-insensitively.
    #[serde(default)]
    pub extra_blocked_terms: Vec<String>,
}

fn default_revenue_multiplier() -> f64 {
    27.5
}

fn default_low_inventory_threshold() -> u64 {
    DEFAULT_LOW_INVENTORY_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            revenue_multiplier: default_revenue_multiplier(),
            low_inventory_threshold: default_low_inventory_threshold(),
            extra_blocked_terms: vec![],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.revenue_multiplier.is_finite() || self.revenue_multiplier < 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.revenue_multiplier));
        }
        if let Some(index) = self
            .extra_blocked_terms
            .iter()
            .position(|t| t.trim().is_empty())
        {
            return Err(ConfigError::EmptyBlockedTerm { index });
        }
        Ok(())
    }
}
