use serde::{Deserialize, Serialize};

use crate::records::{MonthlyRecord, Shipment, Supplier};

/// Closed set of answer topics. Every answer, including refusals, carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Refusal,
    Shipment,
    Month,
    Supplier,
    Logistics,
    Sales,
    Inventory,
    Security,
    Market,
    Fallback,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refusal => "refusal",
            Self::Shipment => "shipment",
            Self::Month => "month",
            Self::Supplier => "supplier",
            Self::Logistics => "logistics",
            Self::Sales => "sales",
            Self::Inventory => "inventory",
            Self::Security => "security",
            Self::Market => "market",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified meaning of an operator query, produced by the intent resolver.
///
/// Lookup variants carry a copy of the matched record so the composer never
/// has to search the snapshot a second time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// A `TR-####` tracking ID was found in the query. `record` is `None`
    /// when the snapshot has no shipment with that ID.
    ShipmentLookup {
        id: String,
        record: Option<Shipment>,
    },
    MonthLookup {
        record: MonthlyRecord,
    },
    SupplierLookup {
        supplier: Supplier,
    },
    LogisticsSummary,
    SalesSummary,
    InventorySummary,
    SecuritySummary,
    MarketInquiry,
    Fallback,
}

impl Intent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::ShipmentLookup { .. } => Topic::Shipment,
            Self::MonthLookup { .. } => Topic::Month,
            Self::SupplierLookup { .. } => Topic::Supplier,
            Self::LogisticsSummary => Topic::Logistics,
            Self::SalesSummary => Topic::Sales,
            Self::InventorySummary => Topic::Inventory,
            Self::SecuritySummary => Topic::Security,
            Self::MarketInquiry => Topic::Market,
            Self::Fallback => Topic::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ShipmentStatus;

    #[test]
    fn intent_topics() {
        let lookup = Intent::ShipmentLookup {
            id: "TR-1241".into(),
            record: None,
        };
        assert_eq!(lookup.topic(), Topic::Shipment);
        assert_eq!(Intent::MarketInquiry.topic(), Topic::Market);
        assert_eq!(Intent::Fallback.topic(), Topic::Fallback);
    }

    #[test]
    fn intent_serialization_is_tagged() {
        let json = serde_json::to_value(Intent::SecuritySummary).unwrap();
        assert_eq!(json["intent"], "security_summary");

        let lookup = Intent::ShipmentLookup {
            id: "TR-1241".into(),
            record: Some(Shipment::new(
                "TR-1241",
                ShipmentStatus::InTransit,
                65,
                "2 days",
                "Rotterdam",
            )),
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json["intent"], "shipment_lookup");
        assert_eq!(json["record"]["progress"], 65);
    }

    #[test]
    fn topic_serialization() {
        assert_eq!(serde_json::to_string(&Topic::Logistics).unwrap(), r#""logistics""#);
        assert_eq!(Topic::Refusal.to_string(), "refusal");
    }
}
