//! Case-insensitive substring search used by the list screens.

use crate::models::{AccountReceivable, Diagnostic, Estimate, Vehicle};

/// A record that can be matched against a search query.
pub trait Searchable {
    /// The text fields the query is matched against.
    fn search_fields(&self) -> Vec<String>;

    /// `needle` must already be trimmed and lowercased.
    fn matches(
        &self,
        needle: &str,
    ) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Records matching `query`, in their original order.
///
/// A blank query matches everything.
pub fn filter<'a, T: Searchable>(
    records: &'a [T],
    query: &str,
) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.vin.clone(),
            self.make.clone(),
            self.model.clone(),
            self.license_plate.clone(),
            self.customer_name.clone(),
        ]
    }
}

impl Searchable for Diagnostic {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.customer_concern.clone(),
            self.findings.clone(),
            self.technician_name.clone().unwrap_or_default(),
        ]
    }
}

impl Searchable for Estimate {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vehicle_id.to_string(),
            self.customer_note.clone(),
            self.authorization_status.as_str().to_string(),
        ]
    }
}

impl Searchable for AccountReceivable {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone(),
            self.status.as_str().to_string(),
        ]
    }
}
