//! Derived-value calculations for the repair shop.
//!
//! Everything in here is pure: the same inputs always produce the same
//! outputs, and no function touches the network or mutates its arguments.

pub mod common;
pub mod estimate_totals;
pub mod receivable;
pub mod sales_report;

pub use estimate_totals::{EstimateCalculator, EstimateTotals};
pub use receivable::{AccountDetails, PaymentDraft, balance_due, derive_status, validate_payment};
pub use sales_report::{DateRange, ReportError, summarize_sales};
