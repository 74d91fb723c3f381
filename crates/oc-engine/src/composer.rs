//! Response composer: renders one sentence per intent and the evidence slice
//! it was built from.
//!
//! Sentences only interpolate values that are also written to the evidence.
//! Averages and currency use 2 decimal places; scores and progress are
//! integer percentages.

use oc_protocol::{
    CheckStatus, Evidence, EvidenceRecord, Intent, MonthlyRecord, Shipment, ShipmentStatus,
    Supplier,
};

use crate::snapshot::{Snapshot, round2};

/// Topics listed by the fallback and market answers.
pub const SUPPORTED_TOPICS: &[&str] = &[
    "shipment tracking by ID",
    "monthly sales and inventory",
    "supplier reliability",
    "logistics status",
    "sales trends and forecasts",
    "inventory alerts",
    "security audits",
];

pub const FALLBACK_MESSAGE: &str = "I can help with shipment tracking by ID, monthly sales \
and inventory, supplier reliability, logistics status, sales trends and forecasts, inventory \
alerts, and security audits. Try asking about one of those.";

pub const MARKET_MESSAGE: &str = "The dashboard snapshot holds no live commodity prices or \
market news, so I can't answer that without inventing figures. I can report on sales, \
inventory, logistics, suppliers, and security instead.";

/// Renders answers for resolved intents.
#[derive(Debug, Clone)]
pub struct Composer {
    revenue_multiplier: f64,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(27.5)
    }
}

impl Composer {
    pub fn new(revenue_multiplier: f64) -> Self {
        Self { revenue_multiplier }
    }

    pub fn compose(&self, intent: &Intent, snapshot: &Snapshot) -> (String, EvidenceRecord) {
        let (sentence, slice) = match intent {
            Intent::ShipmentLookup { id, record } => shipment(id, record.as_ref()),
            Intent::MonthLookup { record } => month(record, snapshot),
            Intent::SupplierLookup { supplier: s } => supplier(s, snapshot),
            Intent::LogisticsSummary => logistics(snapshot),
            Intent::SalesSummary => self.sales(snapshot),
            Intent::InventorySummary => inventory(snapshot),
            Intent::SecuritySummary => security(snapshot),
            Intent::MarketInquiry => (
                MARKET_MESSAGE.to_string(),
                Evidence::Market {
                    external_data_available: false,
                    supported_topics: supported_topics(),
                },
            ),
            Intent::Fallback => (
                FALLBACK_MESSAGE.to_string(),
                Evidence::Fallback {
                    supported_topics: supported_topics(),
                },
            ),
        };
        (sentence, EvidenceRecord::new(slice))
    }

    fn sales(&self, snapshot: &Snapshot) -> (String, Evidence) {
        let c = snapshot.computed();
        let months = snapshot.monthly();
        let estimated_revenue = round2(c.total_sales as f64 * self.revenue_multiplier);

        let sentence = if months.is_empty() {
            "No monthly sales records are loaded.".to_string()
        } else {
            format!(
                "Total sales over {} months came to {} units, averaging {:.2} per month, \
                 for an estimated revenue of ${:.2}. The sales trend is {}, with forecasts \
                 averaging {:.2} per month.",
                months.len(),
                c.total_sales,
                c.avg_sales,
                estimated_revenue,
                c.sales_trend,
                c.avg_forecast,
            )
        };

        let evidence = Evidence::Sales {
            month_count: months.len(),
            total_sales: c.total_sales,
            avg_sales: c.avg_sales,
            avg_forecast: c.avg_forecast,
            revenue_multiplier: self.revenue_multiplier,
            estimated_revenue,
            sales_trend: c.sales_trend,
            trend_slope: c.sales_trend_slope,
            months: months.to_vec(),
        };
        (sentence, evidence)
    }
}

/// Compose with the default revenue multiplier.
pub fn compose(intent: &Intent, snapshot: &Snapshot) -> (String, EvidenceRecord) {
    Composer::default().compose(intent, snapshot)
}

fn supported_topics() -> Vec<String> {
    SUPPORTED_TOPICS.iter().map(|t| t.to_string()).collect()
}

fn shipment(id: &str, record: Option<&Shipment>) -> (String, Evidence) {
    let sentence = match record {
        None => format!("No shipment record was found for {id}."),
        Some(s) if s.status == ShipmentStatus::Delivered => format!(
            "Shipment {} to {} has been delivered ({}% complete).",
            s.id, s.destination, s.progress
        ),
        Some(s) => format!(
            "Shipment {} is {} to {}, {}% complete, with an ETA of {}.",
            s.id, s.status, s.destination, s.progress, s.eta
        ),
    };
    let evidence = Evidence::Shipment {
        shipment_id: id.to_string(),
        found: record.is_some(),
        shipment: record.cloned(),
    };
    (sentence, evidence)
}

fn month(record: &MonthlyRecord, snapshot: &Snapshot) -> (String, Evidence) {
    let threshold = snapshot.computed().low_inventory_threshold;
    let below_threshold = record.inventory < threshold;
    let suffix = if below_threshold {
        format!(", below the {threshold}-unit low-stock threshold")
    } else {
        String::new()
    };
    let sentence = format!(
        "In {}, sales were {} units against a forecast of {}, with {} units in inventory{}.",
        record.name, record.sales, record.forecast, record.inventory, suffix
    );
    let evidence = Evidence::Month {
        month: record.clone(),
        low_inventory_threshold: threshold,
        below_threshold,
    };
    (sentence, evidence)
}

fn supplier(supplier: &Supplier, snapshot: &Snapshot) -> (String, Evidence) {
    let is_top_supplier = snapshot.computed().top_supplier.as_deref() == Some(supplier.name.as_str());
    let mut sentence = format!(
        "{} has a reliability score of {}% and is rated {}",
        supplier.name, supplier.score, supplier.status
    );
    if is_top_supplier {
        sentence.push_str(", the highest in the supplier list");
    }
    sentence.push('.');
    if !supplier.details.trim().is_empty() {
        sentence.push_str(" Notes: ");
        sentence.push_str(supplier.details.trim());
    }
    let evidence = Evidence::Supplier {
        supplier: supplier.clone(),
        is_top_supplier,
    };
    (sentence, evidence)
}

fn logistics(snapshot: &Snapshot) -> (String, Evidence) {
    let shipments = snapshot.shipments();
    let active = snapshot.computed().active_shipment_count;

    let sentence = if shipments.is_empty() {
        "No shipments are being tracked.".to_string()
    } else if active == 0 {
        format!("None of the {} tracked shipments are active.", shipments.len())
    } else {
        let details: Vec<String> = shipments
            .iter()
            .filter(|s| s.status.is_active())
            .map(|s| {
                format!(
                    "{} {} to {} ({}%, ETA {})",
                    s.id, s.status, s.destination, s.progress, s.eta
                )
            })
            .collect();
        format!(
            "{} of {} shipments are active: {}.",
            active,
            shipments.len(),
            details.join("; ")
        )
    };

    let evidence = Evidence::Logistics {
        active_shipment_count: active,
        total_shipments: shipments.len(),
        shipments: shipments.to_vec(),
    };
    (sentence, evidence)
}

fn inventory(snapshot: &Snapshot) -> (String, Evidence) {
    let c = snapshot.computed();
    let low: Vec<MonthlyRecord> = snapshot
        .low_inventory_records()
        .into_iter()
        .cloned()
        .collect();

    let mut sentence = format!("Total inventory stands at {} units.", c.total_inventory);
    if low.is_empty() {
        sentence.push_str(&format!(
            " No month fell below the {}-unit threshold.",
            c.low_inventory_threshold
        ));
    } else {
        let listed: Vec<String> = low
            .iter()
            .map(|m| format!("{} ({})", m.name, m.inventory))
            .collect();
        sentence.push_str(&format!(
            " {} {} fell below the {}-unit threshold: {}.",
            low.len(),
            if low.len() == 1 { "month" } else { "months" },
            c.low_inventory_threshold,
            listed.join(", ")
        ));
    }

    let evidence = Evidence::Inventory {
        total_inventory: c.total_inventory,
        low_inventory_threshold: c.low_inventory_threshold,
        low_month_count: low.len(),
        low_inventory_months: low,
    };
    (sentence, evidence)
}

fn security(snapshot: &Snapshot) -> (String, Evidence) {
    let checks = snapshot.security();
    let passed = snapshot.computed().security_pass_count;

    let mut sentence = if checks.is_empty() {
        "No security checks are recorded.".to_string()
    } else {
        format!("{} of {} security checks passed.", passed, checks.len())
    };

    let open: Vec<String> = checks
        .iter()
        .filter(|c| c.status != CheckStatus::Passed)
        .map(|c| format!("{} {} ({}: {})", c.id, c.event, c.status, c.detail.trim()))
        .collect();
    if !open.is_empty() {
        sentence.push_str(" Needs attention: ");
        sentence.push_str(&open.join("; "));
    }

    let evidence = Evidence::Security {
        security_pass_count: passed,
        total_checks: checks.len(),
        checks: checks.to_vec(),
    };
    (sentence, evidence)
}
