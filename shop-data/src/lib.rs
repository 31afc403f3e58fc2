//! File-based inputs for building estimates: line-item CSVs, settings TOML,
//! and logging setup for the command-line tools.

pub mod loader;
pub mod logging;
pub mod settings_file;

pub use loader::{LineItemLoader, LineItemLoaderError, LineItemRecord, LoadedLineItems};
pub use settings_file::{SettingsFileError, load_settings, parse_settings};
