//! Estimate subtotal, tax and total calculation.
//!
//! Totals are recomputed from scratch from the current line items every
//! time they are needed; no running totals are kept anywhere.
//!
//! # Rules
//!
//! | Item      | Extended price          | Tax contribution                            |
//! |-----------|-------------------------|---------------------------------------------|
//! | Part      | quantity × list price   | extended × part tax rate / 100, if taxable  |
//! | Labor     | hours × labor rate      | extended × labor tax rate / 100, if taxable |
//! | Flat fee  | price                   | never taxed                                 |
//!
//! `subtotal` is the sum of all extended prices, `total = subtotal + tax`.
//!
//! Values are kept at full precision while the estimate is being edited.
//! [`EstimateTotals::rounded`] produces the two-decimal figures that are
//! persisted.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use shop_core::calculations::EstimateCalculator;
//! use shop_core::{PartItem, TaxMarkupSettings};
//!
//! let settings = TaxMarkupSettings {
//!     part_tax_rate: dec!(8),
//!     ..Default::default()
//! };
//! let parts = vec![PartItem {
//!     description: "Brake pads".into(),
//!     quantity: dec!(2),
//!     list_price: dec!(50),
//!     taxable: true,
//!     ..Default::default()
//! }];
//!
//! let totals = EstimateCalculator::new(&settings).calculate(&parts, &[], &[]);
//!
//! assert_eq!(totals.subtotal, dec!(100));
//! assert_eq!(totals.tax, dec!(8));
//! assert_eq!(totals.total, dec!(108));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percent_of, round_half_up, saturating_sum};
use crate::models::{EstimateDraft, FlatFeeItem, LaborItem, PartItem, TaxMarkupSettings};

/// Derived totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimateTotals {
    /// Sum of part extended prices.
    pub parts_subtotal: Decimal,

    /// Sum of labor extended prices.
    pub labor_subtotal: Decimal,

    /// Sum of flat fee prices.
    pub flat_fee_subtotal: Decimal,

    /// Tax on taxable parts.
    pub part_tax: Decimal,

    /// Tax on taxable labor.
    pub labor_tax: Decimal,

    /// Sum of every extended price.
    pub subtotal: Decimal,

    /// `part_tax + labor_tax`.
    pub tax: Decimal,

    /// `subtotal + tax`.
    pub total: Decimal,
}

impl EstimateTotals {
    /// Two-decimal figures for persistence.
    ///
    /// Subtotal and tax are rounded independently and the total is their
    /// sum, so the persisted record always satisfies `total = subtotal + tax`.
    pub fn rounded(&self) -> Self {
        let subtotal = round_half_up(self.subtotal);
        let tax = round_half_up(self.tax);
        Self {
            parts_subtotal: round_half_up(self.parts_subtotal),
            labor_subtotal: round_half_up(self.labor_subtotal),
            flat_fee_subtotal: round_half_up(self.flat_fee_subtotal),
            part_tax: round_half_up(self.part_tax),
            labor_tax: round_half_up(self.labor_tax),
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

/// Calculator for estimate totals.
///
/// Borrows the session's tax settings; holds no other state.
#[derive(Debug, Clone, Copy)]
pub struct EstimateCalculator<'a> {
    settings: &'a TaxMarkupSettings,
}

impl<'a> EstimateCalculator<'a> {
    pub fn new(settings: &'a TaxMarkupSettings) -> Self {
        Self { settings }
    }

    /// Computes subtotal, tax and total for the given line items.
    ///
    /// Never fails. Missing or non-numeric inputs have already been coerced
    /// to zero when the items were built, and negative operands are treated
    /// as zero, so every figure is non-negative. Figures too large to represent
    /// saturate at [`Decimal::MAX`].
    pub fn calculate(
        &self,
        parts: &[PartItem],
        labors: &[LaborItem],
        flat_fees: &[FlatFeeItem],
    ) -> EstimateTotals {
        let parts_subtotal = saturating_sum(parts.iter().map(PartItem::extended_price));
        let labor_subtotal = saturating_sum(labors.iter().map(LaborItem::extended_price));
        let flat_fee_subtotal = saturating_sum(flat_fees.iter().map(FlatFeeItem::extended_price));

        let part_tax = saturating_sum(parts.iter().map(|p| self.part_tax(p)));
        let labor_tax = saturating_sum(labors.iter().map(|l| self.labor_tax(l)));

        let subtotal = saturating_sum([parts_subtotal, labor_subtotal, flat_fee_subtotal]);
        let tax = part_tax.saturating_add(labor_tax);

        tracing::debug!(
            parts = parts.len(),
            labors = labors.len(),
            flat_fees = flat_fees.len(),
            %subtotal,
            %tax,
            "recomputed estimate totals"
        );

        EstimateTotals {
            parts_subtotal,
            labor_subtotal,
            flat_fee_subtotal,
            part_tax,
            labor_tax,
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    /// Convenience wrapper over [`Self::calculate`] for a whole draft.
    pub fn calculate_draft(
        &self,
        draft: &EstimateDraft,
    ) -> EstimateTotals {
        self.calculate(&draft.parts, &draft.labors, &draft.flat_fees)
    }

    /// Tax contributed by a single part.
    pub fn part_tax(
        &self,
        part: &PartItem,
    ) -> Decimal {
        if part.taxable {
            percent_of(part.extended_price(), self.settings.part_tax_rate)
        } else {
            Decimal::ZERO
        }
    }

    /// Tax contributed by a single labor line.
    pub fn labor_tax(
        &self,
        labor: &LaborItem,
    ) -> Decimal {
        if labor.taxable {
            percent_of(labor.extended_price(), self.settings.labor_tax_rate)
        } else {
            Decimal::ZERO
        }
    }
}
