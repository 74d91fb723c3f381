//! Evidence payloads returned alongside every answer.
//!
//! Each topic has its own statically known shape. On the wire the payload is a
//! flat JSON object: the assistant policy, a `topic` tag, and the slice of the
//! snapshot the sentence was rendered from.

use serde::{Deserialize, Serialize};

use crate::intent::Topic;
use crate::records::{MonthlyRecord, SecurityCheck, Shipment, Supplier};

/// Policy text attached to every evidence record.
pub const ASSISTANT_POLICY: &str = "Answers are drawn only from the loaded dashboard snapshot. \
Figures that are not present in the snapshot are never reported.";

/// Direction of the least-squares trend fitted over monthly sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesTrend {
    Upward,
    Downward,
    #[default]
    Flat,
}

impl SalesTrend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Upward
        } else if slope < 0.0 {
            Self::Downward
        } else {
            Self::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Downward => "downward",
            Self::Flat => "flat",
        }
    }
}

impl std::fmt::Display for SalesTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the guardrail refused a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalCategory {
    /// Attempt to override or extract the assistant's instructions.
    PromptOverride,
    /// Request unrelated to supply-chain operations.
    OffTopic,
}

/// Topic-specific evidence slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "snake_case")]
pub enum Evidence {
    Refusal {
        blocked: bool,
        category: RefusalCategory,
        matched_term: String,
    },
    Shipment {
        shipment_id: String,
        found: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shipment: Option<Shipment>,
    },
    Month {
        month: MonthlyRecord,
        low_inventory_threshold: u64,
        below_threshold: bool,
    },
    Supplier {
        supplier: Supplier,
        is_top_supplier: bool,
    },
    Logistics {
        active_shipment_count: usize,
        total_shipments: usize,
        shipments: Vec<Shipment>,
    },
    Sales {
        month_count: usize,
        total_sales: u64,
        avg_sales: f64,
        avg_forecast: f64,
        revenue_multiplier: f64,
        estimated_revenue: f64,
        sales_trend: SalesTrend,
        trend_slope: f64,
        months: Vec<MonthlyRecord>,
    },
    Inventory {
        total_inventory: u64,
        low_inventory_threshold: u64,
        low_month_count: usize,
        low_inventory_months: Vec<MonthlyRecord>,
    },
    Security {
        security_pass_count: usize,
        total_checks: usize,
        checks: Vec<SecurityCheck>,
    },
    Market {
        external_data_available: bool,
        supported_topics: Vec<String>,
    },
    Fallback {
        supported_topics: Vec<String>,
    },
}

impl Evidence {
    pub fn topic(&self) -> Topic {
        match self {
            Self::Refusal { .. } => Topic::Refusal,
            Self::Shipment { .. } => Topic::Shipment,
            Self::Month { .. } => Topic::Month,
            Self::Supplier { .. } => Topic::Supplier,
            Self::Logistics { .. } => Topic::Logistics,
            Self::Sales { .. } => Topic::Sales,
            Self::Inventory { .. } => Topic::Inventory,
            Self::Security { .. } => Topic::Security,
            Self::Market { .. } => Topic::Market,
            Self::Fallback { .. } => Topic::Fallback,
        }
    }
}

/// Evidence as handed to the dashboard: policy text plus the topic slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub policy: String,
    #[serde(flatten)]
    pub slice: Evidence,
}

impl EvidenceRecord {
    pub fn new(slice: Evidence) -> Self {
        Self {
            policy: ASSISTANT_POLICY.to_string(),
            slice,
        }
    }

    pub fn topic(&self) -> Topic {
        self.slice.topic()
    }

    /// True only for guardrail refusals.
    pub fn is_blocked(&self) -> bool {
        matches!(self.slice, Evidence::Refusal { blocked: true, .. })
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Every field is a string, number, bool or nested struct of those.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_record_is_flat_with_topic_tag() {
        let record = EvidenceRecord::new(Evidence::Shipment {
            shipment_id: "TR-9999".into(),
            found: false,
            shipment: None,
        });
        let json = record.to_value();
        assert_eq!(json["policy"], ASSISTANT_POLICY);
        assert_eq!(json["topic"], "shipment");
        assert_eq!(json["found"], false);
        assert!(json.get("shipment").is_none()); // skip_serializing_if = None
    }

    #[test]
    fn refusal_marks_blocked() {
        let record = EvidenceRecord::new(Evidence::Refusal {
            blocked: true,
            category: RefusalCategory::PromptOverride,
            matched_term: "bypass".into(),
        });
        assert!(record.is_blocked());
        assert_eq!(record.topic(), Topic::Refusal);
        let json = record.to_value();
        assert_eq!(json["blocked"], true);
        assert_eq!(json["category"], "prompt_override");
    }

    #[test]
    fn evidence_record_deserializes() {
        let json = r#"{
            "policy": "p",
            "topic": "fallback",
            "supported_topics": ["sales"]
        }"#;
        let record: EvidenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.topic(), Topic::Fallback);
        assert!(!record.is_blocked());
    }

    #[test]
    fn sales_trend_from_slope() {
        assert_eq!(SalesTrend::from_slope(12.5), SalesTrend::Upward);
        assert_eq!(SalesTrend::from_slope(-0.1), SalesTrend::Downward);
        assert_eq!(SalesTrend::from_slope(0.0), SalesTrend::Flat);
        assert_eq!(SalesTrend::default(), SalesTrend::Flat);
    }
}
