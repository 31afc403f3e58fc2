use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Invoiced and collected amounts for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub invoice_count: u32,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub collected: Decimal,
}

/// Sales summary over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub invoice_count: u32,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tax: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub collected: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub outstanding: Decimal,
    #[serde(default)]
    pub daily: Vec<DailySales>,
}
