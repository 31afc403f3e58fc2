use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Collection state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReceivableStatus {
    #[default]
    Open,
    Partial,
    Paid,
}

impl ReceivableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Partial => "Partial",
            Self::Paid => "Paid",
        }
    }
}

/// The invoice balance tracked for an approved estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReceivable {
    pub id: i64,
    pub estimate_id: i64,
    #[serde(default)]
    pub customer_name: String,
    pub invoice_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tax: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount_paid: Decimal,
    /// Balance as cached by the backend. [`AccountDetails`] recomputes it
    /// from the payments list.
    ///
    /// [`AccountDetails`]: crate::calculations::receivable::AccountDetails
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub balance_due: Decimal,
    #[serde(default)]
    pub status: ReceivableStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Check,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Check => "check",
            Self::Transfer => "transfer",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" | "credit" | "debit" => Some(Self::Card),
            "check" | "cheque" => Some(Self::Check),
            "transfer" | "wire" | "ach" => Some(Self::Transfer),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A payment recorded against an account receivable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub account_id: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub method: PaymentMethod,
    pub paid_on: NaiveDate,
    pub reference: Option<String>,
}

/// For recording new payments (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub paid_on: NaiveDate,
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn receivable_reads_cached_balance_due() {
        let account: AccountReceivable = serde_json::from_str(
            r#"{
                "id": 7,
                "estimate_id": 41,
                "customer_name": "Dana Ruiz",
                "invoice_date": "2026-05-01",
                "subtotal": "200.00",
                "tax": 16,
                "total": "216.00",
                "amount_paid": "100",
                "balance_due": "116.00",
                "status": "Partial"
            }"#,
        )
        .unwrap();

        assert_eq!(account.balance_due, dec!(116));
        assert_eq!(account.status, ReceivableStatus::Partial);
    }

    #[test]
    fn missing_balance_due_defaults_to_zero() {
        let account: AccountReceivable = serde_json::from_str(
            r#"{"id": 7, "estimate_id": 41, "invoice_date": "2026-05-01", "total": "216.00"}"#,
        )
        .unwrap();

        assert_eq!(account.balance_due, dec!(0));
        assert_eq!(account.status, ReceivableStatus::Open);
    }
}
