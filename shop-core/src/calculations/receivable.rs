//! Accounts-receivable balances and payment entry checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, parse_lenient, round_half_up, saturating_sum};
use crate::models::{AccountReceivable, NewPayment, Payment, PaymentMethod, ReceivableStatus};
use crate::validation::ValidationErrors;

/// Outstanding balance after the given payments, never below zero.
pub fn balance_due(
    total: Decimal,
    payments: &[Payment],
) -> Decimal {
    let paid = saturating_sum(payments.iter().map(|p| non_negative(p.amount)));
    non_negative(total.saturating_sub(paid))
}

/// Derives the receivable status from its total and the amount paid so far.
pub fn derive_status(
    total: Decimal,
    paid: Decimal,
) -> ReceivableStatus {
    if paid <= Decimal::ZERO {
        if total <= Decimal::ZERO {
            ReceivableStatus::Paid
        } else {
            ReceivableStatus::Open
        }
    } else if paid >= total {
        ReceivableStatus::Paid
    } else {
        ReceivableStatus::Partial
    }
}

/// An account joined with its payments, as shown on the account screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub account: AccountReceivable,
    pub payments: Vec<Payment>,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
    pub status: ReceivableStatus,
}

impl AccountDetails {
    /// Builds the view, deriving paid/balance/status from the payments list
    /// rather than trusting the cached figures on the account record.
    pub fn new(
        account: AccountReceivable,
        payments: Vec<Payment>,
    ) -> Self {
        let amount_paid = saturating_sum(payments.iter().map(|p| non_negative(p.amount)));
        let balance_due = balance_due(account.total, &payments);
        let status = derive_status(account.total, amount_paid);
        Self {
            account,
            payments,
            amount_paid,
            balance_due,
            status,
        }
    }
}

/// Raw payment form fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentDraft {
    pub amount: String,
    pub method: PaymentMethod,
    pub paid_on: Option<NaiveDate>,
    pub reference: String,
}

/// Checks a payment form against the outstanding balance.
///
/// # Errors
///
/// Returns every problem found: a missing or non-positive amount, an amount
/// larger than `balance`, or a missing date.
pub fn validate_payment(
    draft: &PaymentDraft,
    balance: Decimal,
) -> Result<NewPayment, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let amount = round_half_up(parse_lenient(&draft.amount));
    if amount <= Decimal::ZERO {
        errors.push("Payment amount must be greater than zero");
    } else if amount > round_half_up(balance) {
        errors.push(format!(
            "Payment amount {amount} exceeds the balance due of {}",
            round_half_up(balance)
        ));
    }
    if draft.paid_on.is_none() {
        errors.push("Payment date is required");
    }

    let paid_on = match draft.paid_on {
        Some(date) if errors.is_empty() => date,
        _ => return Err(errors),
    };

    let reference = draft.reference.trim();
    Ok(NewPayment {
        amount,
        method: draft.method,
        paid_on,
        reference: (!reference.is_empty()).then(|| reference.to_string()),
    })
}
