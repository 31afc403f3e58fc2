use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Tax and markup configuration fetched once per estimate session.
///
/// Rates are percentages (`8` means 8%).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxMarkupSettings {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub part_tax_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub labor_tax_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub parts_taxable_by_default: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub labor_taxable_by_default: bool,
    #[serde(default, deserialize_with = "lenient::decimal_vec")]
    pub hourly_rates: Vec<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub default_hourly_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub part_markup: Decimal,
}

impl TaxMarkupSettings {
    /// Whether `rate` is one of the configured hourly rate options.
    ///
    /// When no options are configured any rate is accepted.
    pub fn offers_rate(
        &self,
        rate: Decimal,
    ) -> bool {
        self.hourly_rates.is_empty() || self.hourly_rates.contains(&rate)
    }

    /// List price suggested for a part bought at `net_price`.
    pub fn marked_up_price(
        &self,
        net_price: Decimal,
    ) -> Decimal {
        let markup = crate::calculations::common::percent_of(net_price, self.part_markup);
        net_price.saturating_add(markup)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn deserializes_backend_shape_with_string_numbers() {
        let json = r#"{
            "part_tax_rate": "8.25",
            "labor_tax_rate": 0,
            "parts_taxable_by_default": true,
            "labor_taxable_by_default": false,
            "hourly_rates": [95, 120, "145"],
            "default_hourly_rate": 120,
            "part_markup": 40
        }"#;

        let settings: TaxMarkupSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.part_tax_rate, dec!(8.25));
        assert_eq!(settings.hourly_rates, vec![dec!(95), dec!(120), dec!(145)]);
        assert!(settings.parts_taxable_by_default);
        assert!(!settings.labor_taxable_by_default);
    }

    #[test]
    fn offers_rate_checks_configured_options() {
        let settings = TaxMarkupSettings {
            hourly_rates: vec![dec!(95), dec!(120)],
            ..Default::default()
        };

        assert!(settings.offers_rate(dec!(120.00)));
        assert!(!settings.offers_rate(dec!(100)));
    }

    #[test]
    fn offers_any_rate_when_none_configured() {
        assert!(TaxMarkupSettings::default().offers_rate(dec!(77)));
    }

    #[test]
    fn marked_up_price_applies_part_markup() {
        let settings = TaxMarkupSettings {
            part_markup: dec!(40),
            ..Default::default()
        };

        assert_eq!(settings.marked_up_price(dec!(50)), dec!(70));
    }
}
