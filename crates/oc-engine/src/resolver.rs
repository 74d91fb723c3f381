//! Intent resolver: an ordered chain of rules, first match wins.
//!
//! Order is part of the contract. A tracking ID beats a month name, a month
//! name beats a supplier name, and any identifier beats the topic keyword
//! groups. `RULES` is the single place that order is defined.

use std::sync::LazyLock;

use regex::Regex;

use oc_protocol::Intent;

use crate::snapshot::Snapshot;

static SHIPMENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)TR-[0-9]{4}").unwrap());

pub const LOGISTICS_KEYWORDS: &[&str] = &["logistics", "shipment", "transit", "weather"];
pub const SALES_KEYWORDS: &[&str] = &["sales", "forecast", "trend"];
pub const SUPPLIER_KEYWORDS: &[&str] = &["supplier", "vendor"];
pub const INVENTORY_KEYWORDS: &[&str] = &["inventory", "stock", "alert"];
pub const SECURITY_KEYWORDS: &[&str] = &["security", "audit", "guardrail"];
pub const MARKET_KEYWORDS: &[&str] = &["price", "news", "market", "silver", "commodity"];

/// A named step of the resolution chain. `matcher` receives the lower-cased
/// query.
pub struct Rule {
    pub name: &'static str,
    matcher: fn(&str, &Snapshot) -> Option<Intent>,
}

impl Rule {
    pub fn apply(&self, lower_query: &str, snapshot: &Snapshot) -> Option<Intent> {
        (self.matcher)(lower_query, snapshot)
    }
}

/// Resolution chain in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "shipment_id",
        matcher: match_shipment_id,
    },
    Rule {
        name: "month_name",
        matcher: match_month_name,
    },
    Rule {
        name: "supplier_name",
        matcher: match_supplier_name,
    },
    Rule {
        name: "logistics_keywords",
        matcher: match_logistics,
    },
    Rule {
        name: "sales_keywords",
        matcher: match_sales,
    },
    Rule {
        name: "supplier_keywords",
        matcher: match_supplier_keywords,
    },
    Rule {
        name: "inventory_keywords",
        matcher: match_inventory,
    },
    Rule {
        name: "security_keywords",
        matcher: match_security,
    },
    Rule {
        name: "market_keywords",
        matcher: match_market,
    },
];

/// Intent plus the name of the rule that produced it (`None` for fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub intent: Intent,
    pub rule: Option<&'static str>,
}

/// Classify a query. Unmatched input, including empty input, is `Fallback`.
pub fn resolve(query: &str, snapshot: &Snapshot) -> Intent {
    resolve_traced(query, snapshot).intent
}

pub fn resolve_traced(query: &str, snapshot: &Snapshot) -> Resolution {
    let lower = query.to_lowercase();
    RULES
        .iter()
        .find_map(|rule| {
            rule.apply(&lower, snapshot).map(|intent| Resolution {
                intent,
                rule: Some(rule.name),
            })
        })
        .unwrap_or(Resolution {
            intent: Intent::Fallback,
            rule: None,
        })
}

// ── Identifier rules ──────────────────────────────────────────

fn match_shipment_id(query: &str, snapshot: &Snapshot) -> Option<Intent> {
    let id = SHIPMENT_ID.find(query)?.as_str().to_uppercase();
    let record = snapshot.shipment(&id).cloned();
    Some(Intent::ShipmentLookup { id, record })
}

/// Labels are checked in snapshot order as plain substrings, so "summary"
/// reads as Mar and "maybe" as May.
fn match_month_name(query: &str, snapshot: &Snapshot) -> Option<Intent> {
    snapshot
        .monthly()
        .iter()
        .find(|record| {
            let label = record.name.trim().to_lowercase();
            !label.is_empty() && query.contains(&label)
        })
        .map(|record| Intent::MonthLookup {
            record: record.clone(),
        })
}

fn match_supplier_name(query: &str, snapshot: &Snapshot) -> Option<Intent> {
    snapshot
        .suppliers()
        .iter()
        .find(|s| {
            let name = s.name.trim().to_lowercase();
            !name.is_empty() && query.contains(&name)
        })
        .map(|supplier| Intent::SupplierLookup {
            supplier: supplier.clone(),
        })
}

// ── Keyword rules ─────────────────────────────────────────────

fn match_logistics(query: &str, _: &Snapshot) -> Option<Intent> {
    matches_any(query, LOGISTICS_KEYWORDS).then_some(Intent::LogisticsSummary)
}

fn match_sales(query: &str, _: &Snapshot) -> Option<Intent> {
    matches_any(query, SALES_KEYWORDS).then_some(Intent::SalesSummary)
}

/// Generic supplier questions are answered with the top-rated supplier.
fn match_supplier_keywords(query: &str, snapshot: &Snapshot) -> Option<Intent> {
    if !matches_any(query, SUPPLIER_KEYWORDS) {
        return None;
    }
    snapshot
        .top_supplier()
        .map(|supplier| Intent::SupplierLookup {
            supplier: supplier.clone(),
        })
}

fn match_inventory(query: &str, _: &Snapshot) -> Option<Intent> {
    matches_any(query, INVENTORY_KEYWORDS).then_some(Intent::InventorySummary)
}

fn match_security(query: &str, _: &Snapshot) -> Option<Intent> {
    matches_any(query, SECURITY_KEYWORDS).then_some(Intent::SecuritySummary)
}

fn match_market(query: &str, _: &Snapshot) -> Option<Intent> {
    matches_any(query, MARKET_KEYWORDS).then_some(Intent::MarketInquiry)
}

// ── Helpers ───────────────────────────────────────────────────

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
