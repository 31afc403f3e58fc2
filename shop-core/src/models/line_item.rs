use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::calculations::common::non_negative;

/// The three kinds of line item an estimate can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Part,
    Labor,
    FlatFee,
}

impl LineItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Labor => "labor",
            Self::FlatFee => "flat_fee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Part => "Part",
            Self::Labor => "Labor",
            Self::FlatFee => "Flat fee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "part" | "parts" => Some(Self::Part),
            "labor" | "labour" => Some(Self::Labor),
            "flat_fee" | "flat fee" | "flatfee" | "fee" => Some(Self::FlatFee),
            _ => None,
        }
    }
}

/// A part on an estimate.
///
/// The extended price is not stored; it is always derived from
/// `quantity × list_price` so the displayed and summed values cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub quantity: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub net_price: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub list_price: Decimal,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
}

impl PartItem {
    /// `quantity × list_price`; net price never participates.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn extended_price(&self) -> Decimal {
        non_negative(self.quantity).saturating_mul(non_negative(self.list_price))
    }

    /// The part number with surrounding whitespace removed, or `None` when
    /// it is absent or blank.
    pub fn part_number_key(&self) -> Option<&str> {
        self.part_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A labor line, billed by the hour at one of the configured rates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaborItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub duration_hours: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub labor_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
}

impl LaborItem {
    /// `duration_hours × labor_rate`.
    pub fn extended_price(&self) -> Decimal {
        non_negative(self.duration_hours).saturating_mul(non_negative(self.labor_rate))
    }
}

/// A fixed-price fee (shop supplies, disposal, diagnostics). Never taxed.
///
/// Any `taxable` field sent by the backend is ignored on input and never
/// written on output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatFeeItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Decimal,
}

impl FlatFeeItem {
    pub fn extended_price(&self) -> Decimal {
        non_negative(self.price)
    }
}
