//! Output verification: every figure in a composed sentence must be backed
//! by a value in its evidence.
//!
//! A figure is backed when some evidence number, rounded to the figure's
//! decimal places, equals it. Numerals embedded in evidence strings
//! ("TR-1241", "5 days") count as evidence numbers.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use oc_protocol::EvidenceRecord;

use crate::error::GroundingError;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

const TOLERANCE: f64 = 1e-6;

/// A numeral found in text, with the number of decimal places it was written with.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub text: String,
    pub value: f64,
    pub decimals: u32,
}

/// Extract every numeral from `text`, in order.
pub fn figures(text: &str) -> Vec<Figure> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str();
            let value = raw.parse::<f64>().ok()?;
            let decimals = raw
                .split_once('.')
                .map(|(_, frac)| frac.len() as u32)
                .unwrap_or(0);
            Some(Figure {
                text: raw.to_string(),
                value,
                decimals,
            })
        })
        .collect()
}

/// Fails on the first figure in `sentence` that the evidence cannot back.
pub fn check_grounded(sentence: &str, evidence: &EvidenceRecord) -> Result<(), GroundingError> {
    let claimed = figures(sentence);
    if claimed.is_empty() {
        return Ok(());
    }

    let mut known = Vec::new();
    collect_numbers(&evidence.to_value(), &mut known);

    match claimed.into_iter().find(|f| !is_backed(f, &known)) {
        Some(figure) => Err(GroundingError::UngroundedFigure {
            figure: figure.text,
        }),
        None => Ok(()),
    }
}

fn is_backed(figure: &Figure, known: &[f64]) -> bool {
    known
        .iter()
        .any(|v| (round_to(*v, figure.decimals) - figure.value).abs() < TOLERANCE)
}

fn collect_numbers(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Number(n) => out.extend(n.as_f64()),
        Value::String(s) => out.extend(figures(s).into_iter().map(|f| f.value)),
        Value::Array(items) => items.iter().for_each(|v| collect_numbers(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_numbers(v, out)),
        Value::Bool(_) | Value::Null => {}
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(12) as i32);
    (value * scale).round() / scale
}
