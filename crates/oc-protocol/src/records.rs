//! Raw snapshot records: monthly metrics, suppliers, shipments, security checks.

use serde::{Deserialize, Serialize};

// ── Monthly metrics ───────────────────────────────────────────

/// Sales, inventory and forecast figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month label as shown on the dashboard (e.g. "Jan").
    pub name: String,
    /// Units sold.
    pub sales: u64,
    /// Units on hand at month end.
    pub inventory: u64,
    /// Forecast units for the month.
    pub forecast: u64,
}

impl MonthlyRecord {
    pub fn new(name: impl Into<String>, sales: u64, inventory: u64, forecast: u64) -> Self {
        Self {
            name: name.into(),
            sales,
            inventory,
            forecast,
        }
    }
}

// ── Suppliers ─────────────────────────────────────────────────

/// Reliability label derived from a supplier's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Preferred,
    Approved,
    UnderReview,
}

impl SupplierStatus {
    /// Score bands: 90+ preferred, 75+ approved, anything lower under review.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Preferred,
            75..=89 => Self::Approved,
            _ => Self::UnderReview,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "Preferred",
            Self::Approved => "Approved",
            Self::UnderReview => "Under Review",
        }
    }
}

impl std::fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supplier and its reliability score (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub score: u8,
    pub status: SupplierStatus,
    pub details: String,
}

impl Supplier {
    /// Build a supplier, deriving its status from the score.
    /// Scores above 100 are clamped.
    pub fn new(name: impl Into<String>, score: u8, details: impl Into<String>) -> Self {
        let score = score.min(100);
        Self {
            name: name.into(),
            score,
            status: SupplierStatus::from_score(score),
            details: details.into(),
        }
    }
}

// ── Shipments ─────────────────────────────────────────────────

/// Lifecycle status of a tracked shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Processing,
    InTransit,
    Delayed,
    Delivered,
}

impl ShipmentStatus {
    /// Whether the shipment still counts towards active logistics load.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Delivered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::InTransit => "In Transit",
            Self::Delayed => "Delayed",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked shipment, identified by a `TR-####` tracking ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub status: ShipmentStatus,
    /// Completion percentage (0-100).
    pub progress: u8,
    /// Free-text duration, e.g. "2 days".
    pub eta: String,
    pub destination: String,
}

impl Shipment {
    pub fn new(
        id: impl Into<String>,
        status: ShipmentStatus,
        progress: u8,
        eta: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            progress: progress.min(100),
            eta: eta.into(),
            destination: destination.into(),
        }
    }
}

// ── Security checks ───────────────────────────────────────────

/// Outcome of a security audit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Pending,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the security audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCheck {
    pub id: String,
    pub event: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl SecurityCheck {
    pub fn new(
        id: impl Into<String>,
        event: impl Into<String>,
        status: CheckStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            event: event.into(),
            status,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_status_bands() {
        assert_eq!(SupplierStatus::from_score(100), SupplierStatus::Preferred);
        assert_eq!(SupplierStatus::from_score(90), SupplierStatus::Preferred);
        assert_eq!(SupplierStatus::from_score(89), SupplierStatus::Approved);
        assert_eq!(SupplierStatus::from_score(75), SupplierStatus::Approved);
        assert_eq!(SupplierStatus::from_score(74), SupplierStatus::UnderReview);
        assert_eq!(SupplierStatus::from_score(0), SupplierStatus::UnderReview);
    }

    #[test]
    fn supplier_new_derives_status_and_clamps() {
        let supplier = Supplier::new("Apex Metals", 250, "bulk copper");
        assert_eq!(supplier.score, 100);
        assert_eq!(supplier.status, SupplierStatus::Preferred);
    }

    #[test]
    fn shipment_status_activity() {
        assert!(ShipmentStatus::InTransit.is_active());
        assert!(ShipmentStatus::Delayed.is_active());
        assert!(ShipmentStatus::Processing.is_active());
        assert!(!ShipmentStatus::Delivered.is_active());
    }

    #[test]
    fn shipment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ShipmentStatus::InTransit).unwrap(),
            r#""in_transit""#
        );
        assert_eq!(ShipmentStatus::InTransit.to_string(), "In Transit");
    }

    #[test]
    fn check_status_display() {
        assert_eq!(CheckStatus::Passed.to_string(), "Passed");
        assert_eq!(
            serde_json::to_string(&CheckStatus::Failed).unwrap(),
            r#""failed""#
        );
    }
}
