use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::ProductRecord;

/// Stock level at or below which a record counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Aggregate view of a product feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSummary {
    pub rows: u64,
    pub rows_by_brand: BTreeMap<String, u64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub price_mean: Option<f64>,
    pub total_stock: i64,
    pub low_stock_threshold: i64,
    pub low_stock: u64,
}

pub fn summarize(records: &[ProductRecord], low_stock_threshold: i64) -> FeedSummary {
    let mut rows_by_brand = BTreeMap::new();
    let mut price_min: Option<f64> = None;
    let mut price_max: Option<f64> = None;
    let mut price_total = 0.0;
    let mut total_stock = 0_i64;
    let mut low_stock = 0_u64;

    for record in records {
        *rows_by_brand.entry(record.brand.clone()).or_insert(0) += 1;
        price_min = Some(price_min.map_or(record.price, |min| min.min(record.price)));
        price_max = Some(price_max.map_or(record.price, |max| max.max(record.price)));
        price_total += record.price;
        total_stock = total_stock.saturating_add(record.stock);
        if record.stock <= low_stock_threshold {
            low_stock += 1;
        }
    }

    let price_mean = if records.is_empty() {
        None
    } else {
        Some(price_total / records.len() as f64)
    };

    FeedSummary {
        rows: records.len() as u64,
        rows_by_brand,
        price_min,
        price_max,
        price_mean,
        total_stock,
        low_stock_threshold,
        low_stock,
    }
}

/// Render a deterministic markdown report for a feed summary.
pub fn render_summary(summary: &FeedSummary) -> String {
    let mut lines = Vec::new();

    lines.push("# Stockfeed Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- rows: {}", summary.rows));
    lines.push(format!("- total_stock: {}", summary.total_stock));
    lines.push(format!(
        "- low_stock (<= {}): {}",
        summary.low_stock_threshold, summary.low_stock
    ));
    lines.push(format!("- price_min: {}", format_price(summary.price_min)));
    lines.push(format!("- price_max: {}", format_price(summary.price_max)));
    lines.push(format!("- price_mean: {}", format_price(summary.price_mean)));
    lines.push(String::new());

    lines.push("## Rows by brand".to_string());
    lines.push("| brand | rows |".to_string());
    lines.push("| --- | --- |".to_string());
    for (brand, rows) in &summary.rows_by_brand {
        lines.push(format!("| {brand} | {rows} |"));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn format_price(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "-".to_string())
}
