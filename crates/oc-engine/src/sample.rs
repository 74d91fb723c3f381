//! Compiled-in dashboard snapshot.

use oc_protocol::{
    CheckStatus, MonthlyRecord, SecurityCheck, Shipment, ShipmentStatus, Supplier,
};

use crate::snapshot::{DEFAULT_LOW_INVENTORY_THRESHOLD, Snapshot};

pub fn monthly_records() -> Vec<MonthlyRecord> {
    [
        ("Jan", 4200, 3400, 4000),
        ("Feb", 3800, 1398, 3900),
        ("Mar", 5200, 9800, 5000),
        ("Apr", 4780, 3908, 4900),
        ("May", 5890, 4800, 5700),
        ("Jun", 6390, 3800, 6200),
        ("Jul", 7100, 2900, 7000),
        ("Aug", 7500, 4300, 7400),
        ("Sep", 6800, 3500, 7100),
    ]
    .into_iter()
    .map(|(name, sales, inventory, forecast)| {
        MonthlyRecord::new(name, sales, inventory, forecast)
    })
    .collect()
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier::new(
            "Apex Metals",
            94,
            "Primary silver and copper feedstock; no late deliveries this quarter.",
        ),
        Supplier::new(
            "Borealis Components",
            88,
            "Connector assemblies; minor packaging defects reported in Q2.",
        ),
        Supplier::new(
            "Delta Polymers",
            82,
            "Housing resins; lead times lengthened after the port strike.",
        ),
        Supplier::new(
            "Cobalt Freight Partners",
            71,
            "Regional carrier; repeated missed pickup windows under review.",
        ),
    ]
}

pub fn shipments() -> Vec<Shipment> {
    vec![
        Shipment::new("TR-1241", ShipmentStatus::InTransit, 65, "2 days", "Rotterdam"),
        Shipment::new("TR-1242", ShipmentStatus::Delayed, 30, "5 days", "Singapore"),
        Shipment::new("TR-1243", ShipmentStatus::Delivered, 100, "Arrived", "Chicago"),
        Shipment::new("TR-1244", ShipmentStatus::Processing, 10, "6 days", "Hamburg"),
    ]
}

pub fn security_checks() -> Vec<SecurityCheck> {
    vec![
        SecurityCheck::new(
            "SEC-01",
            "Prompt injection probe",
            CheckStatus::Passed,
            "All injection probes were refused.",
        ),
        SecurityCheck::new(
            "SEC-02",
            "Role-based access review",
            CheckStatus::Passed,
            "No excess privileges found.",
        ),
        SecurityCheck::new(
            "SEC-03",
            "Guardrail regression suite",
            CheckStatus::Passed,
            "Deny list blocks the current attack corpus.",
        ),
        SecurityCheck::new(
            "SEC-04",
            "Vendor API key rotation",
            CheckStatus::Failed,
            "Rotation overdue by 12 days.",
        ),
    ]
}

/// The dashboard snapshot with the default low-inventory threshold.
pub fn sample_snapshot() -> Snapshot {
    sample_snapshot_with_threshold(DEFAULT_LOW_INVENTORY_THRESHOLD)
}

pub fn sample_snapshot_with_threshold(low_inventory_threshold: u64) -> Snapshot {
    Snapshot::build_with_threshold(
        monthly_records(),
        suppliers(),
        shipments(),
        security_checks(),
        low_inventory_threshold,
    )
}
