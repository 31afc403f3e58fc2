use std::path::{Path, PathBuf};

use shop_core::TaxMarkupSettings;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for SettingsFileError {
    fn from(err: toml::de::Error) -> Self {
        SettingsFileError::Parse(err.to_string())
    }
}

/// Parses tax and markup settings from TOML text.
///
/// Field names match the backend settings record. Numbers may be written as
/// TOML numbers or strings; missing fields are zero or `false`.
///
/// ```toml
/// part_tax_rate = 8.25
/// labor_tax_rate = 0
/// parts_taxable_by_default = true
/// labor_taxable_by_default = false
/// hourly_rates = [95, 120, 145]
/// default_hourly_rate = 120
/// part_markup = 40
/// ```
pub fn parse_settings(text: &str) -> Result<TaxMarkupSettings, SettingsFileError> {
    let settings: TaxMarkupSettings = toml::from_str(text)?;

    if !settings.offers_rate(settings.default_hourly_rate) {
        warn!(
            default_hourly_rate = %settings.default_hourly_rate,
            "default hourly rate is not one of the configured rates"
        );
    }
    Ok(settings)
}

pub fn load_settings(path: &Path) -> Result<TaxMarkupSettings, SettingsFileError> {
    debug!(path = %path.display(), "reading settings file");
    let text = std::fs::read_to_string(path).map_err(|source| SettingsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&text)
}
