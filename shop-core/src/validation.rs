//! Submit-time validation of an estimate draft.
//!
//! Recomputation never fails; this gate is where incomplete or inconsistent
//! estimates are stopped. It collects every problem it finds so the user can
//! fix them in one pass, and on success produces the normalized payload that
//! is sent to the backend.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{percent_of, round_half_up, saturating_sum};
use crate::models::{
    AuthorizationStatus, EstimateDraft, EstimateMode, FlatFeeItem, LaborItem, PartItem,
    TaxMarkupSettings,
};

/// A list of human-readable validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn push(
        &mut self,
        message: impl Into<String>,
    ) {
        self.messages.push(message.into());
    }

    pub fn extend_prefixed(
        &mut self,
        prefix: &str,
        messages: Vec<String>,
    ) {
        self.messages
            .extend(messages.into_iter().map(|m| format!("{prefix}: {m}")));
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

// ---------------------------------------------------------------------------
// Field-level checks, shared with the line-item editor
// ---------------------------------------------------------------------------

/// Quantities and hours are persisted at two decimals.
fn finer_than_cents(value: Decimal) -> bool {
    value.normalize().scale() > 2
}

pub fn part_field_errors(part: &PartItem) -> Vec<String> {
    let mut errors = Vec::new();
    if part.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    if part.quantity <= Decimal::ZERO {
        errors.push("Quantity must be greater than zero".to_string());
    } else if finer_than_cents(part.quantity) {
        errors.push("Quantity cannot have more than two decimal places".to_string());
    }
    if part.net_price.is_sign_negative() {
        errors.push("Net price cannot be negative".to_string());
    }
    if part.list_price.is_sign_negative() {
        errors.push("List price cannot be negative".to_string());
    }
    errors
}

pub fn labor_field_errors(labor: &LaborItem) -> Vec<String> {
    let mut errors = Vec::new();
    if labor.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    if labor.duration_hours <= Decimal::ZERO {
        errors.push("Duration must be greater than zero".to_string());
    } else if finer_than_cents(labor.duration_hours) {
        errors.push("Duration cannot have more than two decimal places".to_string());
    }
    if labor.labor_rate.is_sign_negative() {
        errors.push("Labor rate cannot be negative".to_string());
    }
    errors
}

pub fn flat_fee_field_errors(fee: &FlatFeeItem) -> Vec<String> {
    let mut errors = Vec::new();
    if fee.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    if fee.price.is_sign_negative() {
        errors.push("Price cannot be negative".to_string());
    }
    errors
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartPayload {
    pub description: String,
    pub part_number: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub list_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extended_price: Decimal,
    pub taxable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborPayload {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extended_price: Decimal,
    pub taxable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFeePayload {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extended_price: Decimal,
}

/// The normalized estimate sent on create or update.
///
/// Every amount is rounded to two decimals and every id is positive. Each
/// line's extended price is derived from its own rounded operands, and
/// `subtotal` is exactly the sum of those extended prices. Amounts are
/// serialized as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_id: Option<i64>,
    pub parts: Vec<PartPayload>,
    pub labors: Vec<LaborPayload>,
    pub flat_fees: Vec<FlatFeePayload>,
    pub customer_note: String,
    pub technician_note: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub authorization_status: AuthorizationStatus,
}

impl From<&PartItem> for PartPayload {
    fn from(part: &PartItem) -> Self {
        let rounded = PartItem {
            quantity: round_half_up(part.quantity),
            net_price: round_half_up(part.net_price),
            list_price: round_half_up(part.list_price),
            ..part.clone()
        };
        Self {
            description: part.description.trim().to_string(),
            part_number: part.part_number_key().map(str::to_string),
            extended_price: round_half_up(rounded.extended_price()),
            quantity: rounded.quantity,
            net_price: rounded.net_price,
            list_price: rounded.list_price,
            taxable: part.taxable,
        }
    }
}

impl From<&LaborItem> for LaborPayload {
    fn from(labor: &LaborItem) -> Self {
        let rounded = LaborItem {
            duration_hours: round_half_up(labor.duration_hours),
            labor_rate: round_half_up(labor.labor_rate),
            ..labor.clone()
        };
        Self {
            description: labor.description.trim().to_string(),
            extended_price: round_half_up(rounded.extended_price()),
            duration_hours: rounded.duration_hours,
            labor_rate: rounded.labor_rate,
            taxable: labor.taxable,
        }
    }
}

impl From<&FlatFeeItem> for FlatFeePayload {
    fn from(fee: &FlatFeeItem) -> Self {
        let rounded = FlatFeeItem {
            price: round_half_up(fee.price),
            ..fee.clone()
        };
        Self {
            description: fee.description.trim().to_string(),
            price: rounded.price,
            extended_price: rounded.extended_price(),
        }
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

fn check_id(
    errors: &mut ValidationErrors,
    id: Option<i64>,
    required: bool,
    missing: &str,
    label: &str,
) {
    match id {
        None if required => errors.push(missing),
        Some(id) if id <= 0 => errors.push(format!("{label} id must be a positive number")),
        _ => {}
    }
}

/// Validates a draft and produces the payload to persist.
///
/// Does not modify the draft.
///
/// # Errors
///
/// Returns every failure found:
/// - vehicle or diagnostic not selected (create mode only)
/// - no line items at all
/// - a part number used by more than one part
/// - blank customer note
/// - any line item failing its own field checks, including a quantity or
///   duration finer than two decimals
/// - a non-positive id
pub fn validate_estimate(
    draft: &EstimateDraft,
    settings: &TaxMarkupSettings,
) -> Result<EstimatePayload, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let creating = draft.mode() == EstimateMode::Create;

    check_id(
        &mut errors,
        draft.vehicle_id,
        creating,
        "A vehicle must be selected",
        "Vehicle",
    );
    check_id(
        &mut errors,
        draft.diagnostic_id,
        creating,
        "A diagnostic must be selected",
        "Diagnostic",
    );
    if let EstimateMode::Update { estimate_id } = draft.mode() {
        if estimate_id <= 0 {
            errors.push("Estimate id must be a positive number");
        }
    }

    if draft.line_item_count() == 0 {
        errors.push("At least one part, labor or flat fee line item is required");
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for part in &draft.parts {
        if let Some(number) = part.part_number_key() {
            if !seen.insert(number) && reported.insert(number) {
                errors.push(format!("Duplicate part number: {number}"));
            }
        }
    }

    if draft.customer_note.trim().is_empty() {
        errors.push("Customer note is required");
    }

    for (i, part) in draft.parts.iter().enumerate() {
        errors.extend_prefixed(&format!("Part {}", i + 1), part_field_errors(part));
    }
    for (i, labor) in draft.labors.iter().enumerate() {
        errors.extend_prefixed(&format!("Labor {}", i + 1), labor_field_errors(labor));
    }
    for (i, fee) in draft.flat_fees.iter().enumerate() {
        errors.extend_prefixed(&format!("Flat fee {}", i + 1), flat_fee_field_errors(fee));
    }

    if !errors.is_empty() {
        tracing::debug!(problems = errors.len(), "estimate failed validation");
        return Err(errors);
    }

    let parts: Vec<PartPayload> = draft.parts.iter().map(PartPayload::from).collect();
    let labors: Vec<LaborPayload> = draft.labors.iter().map(LaborPayload::from).collect();
    let flat_fees: Vec<FlatFeePayload> = draft.flat_fees.iter().map(FlatFeePayload::from).collect();

    let subtotal = saturating_sum(
        parts
            .iter()
            .map(|p| p.extended_price)
            .chain(labors.iter().map(|l| l.extended_price))
            .chain(flat_fees.iter().map(|f| f.extended_price)),
    );
    let tax = round_half_up(saturating_sum(
        parts
            .iter()
            .filter(|p| p.taxable)
            .map(|p| percent_of(p.extended_price, settings.part_tax_rate))
            .chain(
                labors
                    .iter()
                    .filter(|l| l.taxable)
                    .map(|l| percent_of(l.extended_price, settings.labor_tax_rate)),
            ),
    ));

    let technician_note = draft
        .technician_note
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(EstimatePayload {
        vehicle_id: draft.vehicle_id,
        diagnostic_id: draft.diagnostic_id,
        parts,
        labors,
        flat_fees,
        customer_note: draft.customer_note.trim().to_string(),
        technician_note,
        subtotal,
        tax,
        total: subtotal.saturating_add(tax),
        authorization_status: draft.authorization_status,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn settings() -> TaxMarkupSettings {
        TaxMarkupSettings {
            part_tax_rate: dec!(8),
            labor_tax_rate: dec!(0),
            ..Default::default()
        }
    }

    fn part(number: Option<&str>) -> PartItem {
        PartItem {
            description: "Oil filter".into(),
            part_number: number.map(str::to_string),
            quantity: dec!(1),
            net_price: dec!(6),
            list_price: dec!(9.99),
            taxable: true,
        }
    }

    fn valid_draft() -> EstimateDraft {
        EstimateDraft {
            vehicle_id: Some(3),
            diagnostic_id: Some(9),
            parts: vec![part(Some("P100"))],
            labors: vec![LaborItem {
                description: "Oil change".into(),
                duration_hours: dec!(0.5),
                labor_rate: dec!(95),
                taxable: false,
            }],
            flat_fees: vec![FlatFeeItem {
                description: "Disposal".into(),
                price: dec!(4.5),
            }],
            customer_note: "Customer waiting in lobby".into(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Success path
    // =========================================================================

    #[test]
    fn valid_draft_produces_rounded_payload() {
        let payload = validate_estimate(&valid_draft(), &settings()).unwrap();

        assert_eq!(payload.vehicle_id, Some(3));
        assert_eq!(payload.parts[0].extended_price, dec!(9.99));
        assert_eq!(payload.labors[0].extended_price, dec!(47.50));
        assert_eq!(payload.flat_fees[0].extended_price, dec!(4.50));
        assert_eq!(payload.subtotal, dec!(61.99));
        assert_eq!(payload.tax, dec!(0.80));
        assert_eq!(payload.total, dec!(62.79));
    }

    #[test]
    fn validation_does_not_mutate_the_draft() {
        let draft = valid_draft();
        let before = draft.clone();

        let _ = validate_estimate(&draft, &settings());

        assert_eq!(draft, before);
    }

    #[test]
    fn payload_trims_text_and_drops_blank_part_numbers() {
        let mut draft = valid_draft();
        draft.parts[0].part_number = Some("  ".into());
        draft.parts[0].description = "  Oil filter ".into();
        draft.technician_note = Some("   ".into());

        let payload = validate_estimate(&draft, &settings()).unwrap();

        assert_eq!(payload.parts[0].part_number, None);
        assert_eq!(payload.parts[0].description, "Oil filter");
        assert_eq!(payload.technician_note, None);
    }

    #[test]
    fn update_mode_does_not_require_vehicle_or_diagnostic() {
        let mut draft = valid_draft();
        draft.estimate_id = Some(41);
        draft.vehicle_id = None;
        draft.diagnostic_id = None;

        let payload = validate_estimate(&draft, &settings()).unwrap();

        assert_eq!(payload.vehicle_id, None);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("vehicle_id"));
    }

    #[test]
    fn subtotal_is_the_sum_of_rounded_line_prices() {
        let mut draft = valid_draft();
        draft.parts.clear();
        draft.labors.clear();
        draft.flat_fees = (0..3)
            .map(|_| FlatFeeItem {
                description: "Rag".into(),
                price: dec!(0.005),
            })
            .collect();

        let payload = validate_estimate(&draft, &settings()).unwrap();

        let lines: Decimal = payload.flat_fees.iter().map(|f| f.extended_price).sum();
        assert_eq!(payload.flat_fees[0].extended_price, dec!(0.01));
        assert_eq!(lines, dec!(0.03));
        assert_eq!(payload.subtotal, lines);
        assert_eq!(payload.total, dec!(0.03));
    }

    #[test]
    fn extended_price_is_derived_from_rounded_operands() {
        let mut draft = valid_draft();
        draft.parts[0].quantity = dec!(3);
        draft.parts[0].list_price = dec!(33.335);
        draft.labors.clear();
        draft.flat_fees.clear();

        let payload = validate_estimate(&draft, &settings()).unwrap();

        let line = &payload.parts[0];
        assert_eq!(line.list_price, dec!(33.34));
        assert_eq!(line.extended_price, line.quantity * line.list_price);
        assert_eq!(payload.subtotal, dec!(100.02));
        // 100.02 x 8% = 8.0016
        assert_eq!(payload.tax, dec!(8.00));
        assert_eq!(payload.total, dec!(108.02));
    }

    #[test]
    fn payload_amounts_serialize_as_numbers() {
        let payload = validate_estimate(&valid_draft(), &settings()).unwrap();

        let json = serde_json::to_value(&payload).unwrap();

        assert!(json["subtotal"].is_number());
        assert_eq!(json["total"].as_f64(), Some(62.79));
        assert_eq!(json["parts"][0]["quantity"].as_f64(), Some(1.0));
        assert_eq!(json["labors"][0]["labor_rate"].as_f64(), Some(95.0));
        assert_eq!(json["flat_fees"][0]["extended_price"].as_f64(), Some(4.5));

        let back: EstimatePayload = serde_json::from_value(json).unwrap();
        assert_eq!(back.total, dec!(62.79));
    }

    #[test]
    fn blank_part_numbers_may_repeat() {
        let mut draft = valid_draft();
        draft.parts = vec![part(None), part(Some("")), part(None)];

        assert!(validate_estimate(&draft, &settings()).is_ok());
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[test]
    fn duplicate_part_numbers_fail() {
        let draft = EstimateDraft {
            parts: vec![part(Some("P100")), part(Some("P100"))],
            ..valid_draft()
        };
        let draft = EstimateDraft {
            labors: vec![],
            flat_fees: vec![],
            ..draft
        };

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(errors.messages(), &["Duplicate part number: P100".to_string()]);
    }

    #[test]
    fn duplicate_part_numbers_compare_trimmed_and_report_once() {
        let mut draft = valid_draft();
        draft.parts = vec![part(Some("P100")), part(Some(" P100")), part(Some("P100 "))];

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_customer_note_fails_even_with_valid_items() {
        let mut draft = valid_draft();
        draft.customer_note = String::new();

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(errors.messages(), &["Customer note is required".to_string()]);
    }

    #[test]
    fn whitespace_customer_note_fails() {
        let mut draft = valid_draft();
        draft.customer_note = " \t\n".into();

        assert!(validate_estimate(&draft, &settings()).is_err());
    }

    #[test]
    fn create_mode_requires_vehicle_and_diagnostic() {
        let mut draft = valid_draft();
        draft.vehicle_id = None;
        draft.diagnostic_id = None;

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &[
                "A vehicle must be selected".to_string(),
                "A diagnostic must be selected".to_string(),
            ]
        );
    }

    #[test]
    fn non_positive_ids_fail() {
        let mut draft = valid_draft();
        draft.vehicle_id = Some(0);
        draft.estimate_id = Some(-4);

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &[
                "Vehicle id must be a positive number".to_string(),
                "Estimate id must be a positive number".to_string(),
            ]
        );
    }

    #[test]
    fn no_line_items_fails() {
        let draft = EstimateDraft {
            parts: vec![],
            labors: vec![],
            flat_fees: vec![],
            ..valid_draft()
        };

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &["At least one part, labor or flat fee line item is required".to_string()]
        );
    }

    #[test]
    fn field_errors_are_prefixed_with_item_position() {
        let mut draft = valid_draft();
        draft.parts.push(PartItem {
            description: String::new(),
            quantity: dec!(0),
            list_price: dec!(-1),
            ..Default::default()
        });
        draft.flat_fees[0].price = dec!(-2);

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &[
                "Part 2: Description is required".to_string(),
                "Part 2: Quantity must be greater than zero".to_string(),
                "Part 2: List price cannot be negative".to_string(),
                "Flat fee 1: Price cannot be negative".to_string(),
            ]
        );
    }

    #[test]
    fn labor_with_zero_duration_fails() {
        let mut draft = valid_draft();
        draft.labors[0].duration_hours = dec!(0);

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &["Labor 1: Duration must be greater than zero".to_string()]
        );
    }

    #[test]
    fn sub_cent_quantity_is_rejected() {
        let mut draft = valid_draft();
        draft.parts[0].quantity = dec!(0.004);
        draft.parts[0].list_price = dec!(1000);

        let errors = validate_estimate(&draft, &settings()).unwrap_err();

        assert_eq!(
            errors.messages(),
            &["Part 1: Quantity cannot have more than two decimal places".to_string()]
        );
    }

    #[test]
    fn sub_cent_duration_is_rejected_but_trailing_zeros_are_not() {
        let mut draft = valid_draft();
        draft.labors[0].duration_hours = dec!(1.333);

        let errors = validate_estimate(&draft, &settings()).unwrap_err();
        assert_eq!(
            errors.messages(),
            &["Labor 1: Duration cannot have more than two decimal places".to_string()]
        );

        draft.labors[0].duration_hours = dec!(1.5000);
        assert!(validate_estimate(&draft, &settings()).is_ok());
    }

    // =========================================================================
    // Error display
    // =========================================================================

    #[test]
    fn errors_display_joined_with_semicolons() {
        let errors = ValidationErrors::from(vec![
            "Customer note is required".to_string(),
            "A vehicle must be selected".to_string(),
        ]);

        assert_eq!(
            errors.to_string(),
            "Customer note is required; A vehicle must be selected"
        );
        let source: &dyn std::error::Error = &errors;
        assert!(source.source().is_none());
    }
}
