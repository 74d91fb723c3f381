//! Snapshot builder: the record collections plus their derived statistics.

use serde::Serialize;

use oc_protocol::{CheckStatus, MonthlyRecord, SalesTrend, SecurityCheck, Shipment, Supplier};

/// Inventory below this many units marks a month as low stock.
pub const DEFAULT_LOW_INVENTORY_THRESHOLD: u64 = 3000;

/// Aggregates derived from the snapshot records.
///
/// Averages are rounded to 2 decimal places and are 0.0 over empty input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computed {
    pub total_sales: u64,
    pub avg_sales: f64,
    pub total_inventory: u64,
    pub avg_forecast: f64,
    /// Month names with inventory below `low_inventory_threshold`, in record order.
    pub low_inventory_months: Vec<String>,
    pub low_inventory_threshold: u64,
    /// Highest-scoring supplier; ties go to the earliest record.
    pub top_supplier: Option<String>,
    pub active_shipment_count: usize,
    pub security_pass_count: usize,
    pub sales_trend: SalesTrend,
    /// Least-squares slope of sales per month, rounded to 2 decimal places.
    pub sales_trend_slope: f64,
}

/// Immutable set of records the engine answers from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    monthly: Vec<MonthlyRecord>,
    suppliers: Vec<Supplier>,
    shipments: Vec<Shipment>,
    security: Vec<SecurityCheck>,
    computed: Computed,
}

impl Snapshot {
    /// Build a snapshot using the default low-inventory threshold.
    pub fn build(
        monthly: Vec<MonthlyRecord>,
        suppliers: Vec<Supplier>,
        shipments: Vec<Shipment>,
        security: Vec<SecurityCheck>,
    ) -> Self {
        Self::build_with_threshold(
            monthly,
            suppliers,
            shipments,
            security,
            DEFAULT_LOW_INVENTORY_THRESHOLD,
        )
    }

    pub fn build_with_threshold(
        monthly: Vec<MonthlyRecord>,
        suppliers: Vec<Supplier>,
        shipments: Vec<Shipment>,
        security: Vec<SecurityCheck>,
        low_inventory_threshold: u64,
    ) -> Self {
        let computed = compute(
            &monthly,
            &suppliers,
            &shipments,
            &security,
            low_inventory_threshold,
        );
        Self {
            monthly,
            suppliers,
            shipments,
            security,
            computed,
        }
    }

    pub fn monthly(&self) -> &[MonthlyRecord] {
        &self.monthly
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn security(&self) -> &[SecurityCheck] {
        &self.security
    }

    pub fn computed(&self) -> &Computed {
        &self.computed
    }

    /// Exact, case-sensitive lookup by tracking ID.
    pub fn shipment(&self, id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id == id)
    }

    pub fn top_supplier(&self) -> Option<&Supplier> {
        let name = self.computed.top_supplier.as_deref()?;
        self.suppliers.iter().find(|s| s.name == name)
    }

    /// Records behind `computed.low_inventory_months`, in record order.
    pub fn low_inventory_records(&self) -> Vec<&MonthlyRecord> {
        self.monthly
            .iter()
            .filter(|m| m.inventory < self.computed.low_inventory_threshold)
            .collect()
    }
}

/// Derive every aggregate from the raw records. Pure and total.
pub fn compute(
    monthly: &[MonthlyRecord],
    suppliers: &[Supplier],
    shipments: &[Shipment],
    security: &[SecurityCheck],
    low_inventory_threshold: u64,
) -> Computed {
    let total_sales = saturating_total(monthly.iter().map(|m| m.sales));
    let total_inventory = saturating_total(monthly.iter().map(|m| m.inventory));
    let total_forecast = saturating_total(monthly.iter().map(|m| m.forecast));

    let low_inventory_months = monthly
        .iter()
        .filter(|m| m.inventory < low_inventory_threshold)
        .map(|m| m.name.clone())
        .collect();

    let sales: Vec<f64> = monthly.iter().map(|m| m.sales as f64).collect();
    let sales_trend_slope = round2(linear_slope(&sales));

    Computed {
        total_sales,
        avg_sales: average(total_sales, monthly.len()),
        total_inventory,
        avg_forecast: average(total_forecast, monthly.len()),
        low_inventory_months,
        low_inventory_threshold,
        top_supplier: top_supplier(suppliers).map(|s| s.name.clone()),
        active_shipment_count: shipments.iter().filter(|s| s.status.is_active()).count(),
        security_pass_count: security
            .iter()
            .filter(|c| c.status == CheckStatus::Passed)
            .count(),
        sales_trend: SalesTrend::from_slope(sales_trend_slope),
        sales_trend_slope,
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0u64, u64::saturating_add)
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(total as f64 / count as f64)
}

fn top_supplier(suppliers: &[Supplier]) -> Option<&Supplier> {
    let mut best: Option<&Supplier> = None;
    for supplier in suppliers {
        // Strictly greater keeps the first of equal scores.
        if best.is_none_or(|b| supplier.score > b.score) {
            best = Some(supplier);
        }
    }
    best
}

/// Ordinary least-squares slope of `ys` against their index. 0.0 for fewer
/// than two points.
fn linear_slope(ys: &[f64]) -> f64 {
    let n = ys.len();
    if n < 2 {
        return 0.0;
    }
    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (num, den) = ys
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        });
    num / den
}
