use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use shop_core::calculations::common::{parse_lenient, try_parse};
use shop_core::{
    EstimateDraft, FlatFeeItem, LaborItem, LineItemKind, PartItem, TaxMarkupSettings,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading line items from CSV.
#[derive(Debug, Error)]
pub enum LineItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is the 1-based data row, not counting the header.
    #[error("Row {row}: unknown line item kind '{kind}' (expected part, labor or flat_fee)")]
    UnknownKind { row: usize, kind: String },
}

impl From<csv::Error> for LineItemLoaderError {
    fn from(err: csv::Error) -> Self {
        LineItemLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a line-item CSV file.
///
/// Every column except `kind` may be missing or blank. Which columns matter
/// depends on the kind:
/// - `part`: `description`, `part_number`, `quantity`, `net_price`,
///   `list_price`, `taxable`
/// - `labor`: `description`, `hours`, `rate`, `taxable`
/// - `flat_fee`: `description`, `price`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LineItemRecord {
    pub kind: String,
    pub description: String,
    pub part_number: String,
    pub quantity: String,
    pub net_price: String,
    pub list_price: String,
    pub hours: String,
    pub rate: String,
    pub price: String,
    pub taxable: String,
}

/// Line items read from a file, grouped by kind in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedLineItems {
    pub parts: Vec<PartItem>,
    pub labors: Vec<LaborItem>,
    pub flat_fees: Vec<FlatFeeItem>,
}

impl LoadedLineItems {
    pub fn len(&self) -> usize {
        self.parts.len() + self.labors.len() + self.flat_fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a new estimate draft holding these items.
    pub fn into_draft(
        self,
        vehicle_id: i64,
        diagnostic_id: i64,
    ) -> EstimateDraft {
        EstimateDraft {
            parts: self.parts,
            labors: self.labors,
            flat_fees: self.flat_fees,
            ..EstimateDraft::new(Some(vehicle_id), Some(diagnostic_id))
        }
    }
}

/// Loader for estimate line items from CSV files.
///
/// Numeric cells are coerced leniently: anything that is not a number
/// becomes zero. Blank cells fall back to the shop settings where a default
/// exists (taxability, hourly rate, marked-up list price).
pub struct LineItemLoader;

impl LineItemLoader {
    /// Parse line-item records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LineItemRecord>, LineItemLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LineItemRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Convert records into typed line items.
    pub fn into_items(
        records: &[LineItemRecord],
        settings: &TaxMarkupSettings,
    ) -> Result<LoadedLineItems, LineItemLoaderError> {
        let mut items = LoadedLineItems::default();

        for (index, record) in records.iter().enumerate() {
            let kind = LineItemKind::parse(&record.kind).ok_or_else(|| {
                LineItemLoaderError::UnknownKind {
                    row: index + 1,
                    kind: record.kind.clone(),
                }
            })?;

            match kind {
                LineItemKind::Part => items.parts.push(part_from(record, settings)),
                LineItemKind::Labor => items.labors.push(labor_from(record, settings)),
                LineItemKind::FlatFee => items.flat_fees.push(FlatFeeItem {
                    description: record.description.clone(),
                    price: parse_lenient(&record.price),
                }),
            }
        }

        debug!(
            parts = items.parts.len(),
            labors = items.labors.len(),
            flat_fees = items.flat_fees.len(),
            "line items loaded"
        );
        Ok(items)
    }

    /// Parse and convert in one step.
    pub fn load<R: Read>(
        reader: R,
        settings: &TaxMarkupSettings,
    ) -> Result<LoadedLineItems, LineItemLoaderError> {
        let records = Self::parse(reader)?;
        Self::into_items(&records, settings)
    }
}

fn part_from(
    record: &LineItemRecord,
    settings: &TaxMarkupSettings,
) -> PartItem {
    let net_price = parse_lenient(&record.net_price);
    let list_price = match try_parse(&record.list_price) {
        Some(price) => price,
        None if record.list_price.is_empty() => settings.marked_up_price(net_price),
        None => parse_lenient(&record.list_price),
    };
    let part_number = Some(record.part_number.clone()).filter(|n| !n.is_empty());

    PartItem {
        description: record.description.clone(),
        part_number,
        quantity: if record.quantity.is_empty() {
            Decimal::ONE
        } else {
            parse_lenient(&record.quantity)
        },
        net_price,
        list_price,
        taxable: taxable_or(&record.taxable, settings.parts_taxable_by_default),
    }
}

fn labor_from(
    record: &LineItemRecord,
    settings: &TaxMarkupSettings,
) -> LaborItem {
    let labor_rate = if record.rate.is_empty() {
        settings.default_hourly_rate
    } else {
        parse_lenient(&record.rate)
    };

    LaborItem {
        description: record.description.clone(),
        duration_hours: parse_lenient(&record.hours),
        labor_rate,
        taxable: taxable_or(&record.taxable, settings.labor_taxable_by_default),
    }
}

fn taxable_or(
    cell: &str,
    default: bool,
) -> bool {
    if cell.is_empty() {
        return default;
    }
    matches!(
        cell.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}
