//! Sales summary over a date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::{AccountReceivable, DailySales, SalesReport};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("report range starts on {from} which is after its end {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// An inclusive range of invoice dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, ReportError> {
        if from > to {
            return Err(ReportError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Summarizes the receivables invoiced within `range`.
///
/// Daily rows are ordered by date and only days with at least one invoice
/// appear. Collected amounts are capped at each invoice's total.
pub fn summarize_sales(
    records: &[AccountReceivable],
    range: DateRange,
) -> SalesReport {
    let mut daily: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();
    let mut invoice_count = 0u32;
    let mut subtotal = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    let mut collected = Decimal::ZERO;

    for record in records.iter().filter(|r| range.contains(r.invoice_date)) {
        let paid = non_negative(record.amount_paid).min(non_negative(record.total));

        invoice_count += 1;
        subtotal = subtotal.saturating_add(record.subtotal);
        tax = tax.saturating_add(record.tax);
        total = total.saturating_add(record.total);
        collected = collected.saturating_add(paid);

        let day = daily.entry(record.invoice_date).or_insert_with(|| DailySales {
            date: record.invoice_date,
            invoice_count: 0,
            total: Decimal::ZERO,
            collected: Decimal::ZERO,
        });
        day.invoice_count += 1;
        day.total = day.total.saturating_add(record.total);
        day.collected = day.collected.saturating_add(paid);
    }

    tracing::debug!(
        from = %range.from,
        to = %range.to,
        invoice_count,
        "summarized sales"
    );

    SalesReport {
        from: range.from,
        to: range.to,
        invoice_count,
        subtotal: round_half_up(subtotal),
        tax: round_half_up(tax),
        total: round_half_up(total),
        collected: round_half_up(collected),
        outstanding: round_half_up(non_negative(total.saturating_sub(collected))),
        daily: daily
            .into_values()
            .map(|d| DailySales {
                total: round_half_up(d.total),
                collected: round_half_up(d.collected),
                ..d
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::ReceivableStatus;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn invoice(
        id: i64,
        day: u32,
        total: Decimal,
        paid: Decimal,
    ) -> AccountReceivable {
        AccountReceivable {
            id,
            estimate_id: id * 10,
            customer_name: format!("Customer {id}"),
            invoice_date: date(day),
            subtotal: total - dec!(5),
            tax: dec!(5),
            total,
            amount_paid: paid,
            balance_due: total - paid,
            status: ReceivableStatus::Open,
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DateRange::new(date(10), date(1)),
            Err(ReportError::InvertedRange {
                from: date(10),
                to: date(1)
            })
        );
    }

    #[test]
    fn single_day_range_is_allowed() {
        assert!(DateRange::new(date(4), date(4)).is_ok());
    }

    #[test]
    fn summarizes_records_within_range() {
        let records = vec![
            invoice(1, 2, dec!(105), dec!(105)),
            invoice(2, 2, dec!(55), dec!(0)),
            invoice(3, 5, dec!(205), dec!(100)),
            invoice(4, 20, dec!(1000), dec!(1000)),
        ];
        let range = DateRange::new(date(1), date(10)).unwrap();

        let report = summarize_sales(&records, range);

        assert_eq!(report.invoice_count, 3);
        assert_eq!(report.subtotal, dec!(350));
        assert_eq!(report.tax, dec!(15));
        assert_eq!(report.total, dec!(365));
        assert_eq!(report.collected, dec!(205));
        assert_eq!(report.outstanding, dec!(160));
    }

    #[test]
    fn daily_rows_are_grouped_and_ordered() {
        let records = vec![
            invoice(3, 5, dec!(205), dec!(100)),
            invoice(1, 2, dec!(105), dec!(105)),
            invoice(2, 2, dec!(55), dec!(0)),
        ];
        let range = DateRange::new(date(1), date(31)).unwrap();

        let report = summarize_sales(&records, range);

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, date(2));
        assert_eq!(report.daily[0].invoice_count, 2);
        assert_eq!(report.daily[0].total, dec!(160));
        assert_eq!(report.daily[0].collected, dec!(105));
        assert_eq!(report.daily[1].date, date(5));
    }

    #[test]
    fn overpayment_is_capped_at_invoice_total() {
        let records = vec![invoice(1, 2, dec!(100), dec!(150))];
        let range = DateRange::new(date(1), date(3)).unwrap();

        let report = summarize_sales(&records, range);

        assert_eq!(report.collected, dec!(100));
        assert_eq!(report.outstanding, dec!(0));
    }

    #[test]
    fn empty_range_produces_zero_report() {
        let range = DateRange::new(date(1), date(3)).unwrap();

        let report = summarize_sales(&[], range);

        assert_eq!(report.invoice_count, 0);
        assert_eq!(report.total, dec!(0));
        assert!(report.daily.is_empty());
    }
}
