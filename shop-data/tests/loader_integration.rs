//! Integration tests for loading a whole estimate from fixture files.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use shop_core::calculations::EstimateCalculator;
use shop_core::validation::validate_estimate;
use shop_core::{AuthorizationStatus, EstimateMode};
use shop_data::{LineItemLoader, load_settings};

const BRAKE_JOB_CSV: &str = include_str!("fixtures/brake_job.csv");

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_settings_fixture_loads() {
    let settings = load_settings(&fixture("settings.toml")).expect("Failed to load settings");

    assert_eq!(settings.part_tax_rate, dec!(8.25));
    assert_eq!(settings.labor_tax_rate, dec!(6));
    assert_eq!(settings.hourly_rates, vec![dec!(95), dec!(120), dec!(145)]);
    assert!(settings.offers_rate(settings.default_hourly_rate));
}

#[test]
fn test_brake_job_line_items() {
    let settings = load_settings(&fixture("settings.toml")).unwrap();

    let items = LineItemLoader::load(BRAKE_JOB_CSV.as_bytes(), &settings).unwrap();

    assert_eq!(items.parts.len(), 2);
    assert_eq!(items.labors.len(), 2);
    assert_eq!(items.flat_fees.len(), 2);

    // Blank list price is marked up from net
    let rotor = &items.parts[1];
    assert_eq!(rotor.list_price, dec!(57.75));
    assert_eq!(rotor.extended_price(), dec!(115.50));

    // Blank taxable uses the labor default
    assert!(!items.labors[0].taxable);
    assert!(items.labors[1].taxable);
}

#[test]
fn test_brake_job_totals() {
    let settings = load_settings(&fixture("settings.toml")).unwrap();
    let draft = LineItemLoader::load(BRAKE_JOB_CSV.as_bytes(), &settings)
        .unwrap()
        .into_draft(12, 30);

    let totals = EstimateCalculator::new(&settings).calculate_draft(&draft);

    assert_eq!(totals.parts_subtotal, dec!(178.00));
    assert_eq!(totals.labor_subtotal, dec!(263.50));
    assert_eq!(totals.flat_fee_subtotal, dec!(16.50));
    assert_eq!(totals.subtotal, dec!(458.00));
    assert_eq!(totals.part_tax, dec!(14.685));
    assert_eq!(totals.labor_tax, dec!(2.85));
    assert_eq!(totals.total, dec!(475.535));

    let rounded = totals.rounded();
    assert_eq!(rounded.tax, dec!(17.54));
    assert_eq!(rounded.total, dec!(475.54));
}

#[test]
fn test_brake_job_validates_into_payload() {
    let settings = load_settings(&fixture("settings.toml")).unwrap();
    let mut draft = LineItemLoader::load(BRAKE_JOB_CSV.as_bytes(), &settings)
        .unwrap()
        .into_draft(12, 30);
    draft.customer_note = "Grinding noise when braking".into();

    assert_eq!(draft.mode(), EstimateMode::Create);

    let payload = validate_estimate(&draft, &settings).expect("brake job should validate");

    assert_eq!(payload.vehicle_id, Some(12));
    assert_eq!(payload.diagnostic_id, Some(30));
    assert_eq!(payload.parts.len(), 2);
    assert_eq!(payload.subtotal, dec!(458.00));
    assert_eq!(payload.tax, dec!(17.54));
    assert_eq!(payload.total, dec!(475.54));
    assert_eq!(payload.authorization_status, AuthorizationStatus::Pending);
}

#[test]
fn test_brake_job_without_note_is_rejected() {
    let settings = load_settings(&fixture("settings.toml")).unwrap();
    let draft = LineItemLoader::load(BRAKE_JOB_CSV.as_bytes(), &settings)
        .unwrap()
        .into_draft(12, 30);

    let errors = validate_estimate(&draft, &settings).unwrap_err();

    assert_eq!(errors.messages(), &["Customer note is required".to_string()]);
}
