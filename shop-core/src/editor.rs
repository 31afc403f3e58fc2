//! Add/edit logic behind the part, labor and flat-fee dialogs.
//!
//! An [`ItemEditor`] holds the raw form fields for one line item. Opening it
//! for *add* fills the fields from the session's [`TaxMarkupSettings`];
//! opening it for *edit* copies the item at an index. Confirming builds the
//! item, checks its fields and returns a **new** list with the item appended
//! or replaced. The caller's list is never modified, and cancelling is just
//! dropping the editor.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::parse_lenient;
use crate::models::{FlatFeeItem, LaborItem, PartItem, TaxMarkupSettings};
use crate::validation::{flat_fee_field_errors, labor_field_errors, part_field_errors};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no line item at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("line item is invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Whether the editor appends a new item or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(usize),
}

/// Form fields for one kind of line item.
pub trait LineItemForm: Sized {
    type Item: Clone;

    /// Fields for a brand-new item.
    fn defaults(settings: &TaxMarkupSettings) -> Self;

    /// Fields pre-filled from an existing item.
    fn from_item(item: &Self::Item) -> Self;

    /// Builds the item from the fields. `original` is the item being edited,
    /// if any.
    fn build(
        &self,
        settings: &TaxMarkupSettings,
        original: Option<&Self::Item>,
    ) -> Result<Self::Item, Vec<String>>;
}

/// Editor state for a single line item dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEditor<F> {
    mode: EditorMode,
    pub form: F,
}

impl<F: LineItemForm> ItemEditor<F> {
    /// Opens the editor for a new item with settings-derived defaults.
    pub fn open_add(settings: &TaxMarkupSettings) -> Self {
        Self {
            mode: EditorMode::Add,
            form: F::defaults(settings),
        }
    }

    /// Opens the editor on the item at `index`.
    pub fn open_edit(
        items: &[F::Item],
        index: usize,
    ) -> Result<Self, EditorError> {
        let item = items.get(index).ok_or(EditorError::IndexOutOfRange {
            index,
            len: items.len(),
        })?;
        Ok(Self {
            mode: EditorMode::Edit(index),
            form: F::from_item(item),
        })
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Builds the item and returns the updated list.
    ///
    /// # Errors
    ///
    /// * [`EditorError::Invalid`] if any field fails its checks.
    /// * [`EditorError::IndexOutOfRange`] if the list shrank since the
    ///   editor was opened.
    pub fn confirm(
        &self,
        items: &[F::Item],
        settings: &TaxMarkupSettings,
    ) -> Result<Vec<F::Item>, EditorError> {
        match self.mode {
            EditorMode::Add => {
                let item = self.form.build(settings, None).map_err(EditorError::Invalid)?;
                Ok(append(items, item))
            }
            EditorMode::Edit(index) => {
                let original = items.get(index).ok_or(EditorError::IndexOutOfRange {
                    index,
                    len: items.len(),
                })?;
                let item = self
                    .form
                    .build(settings, Some(original))
                    .map_err(EditorError::Invalid)?;
                replace_at(items, index, item)
            }
        }
    }

    /// Closes the editor without touching any list.
    pub fn cancel(self) {
        tracing::debug!(mode = ?self.mode, "line item edit cancelled");
    }
}

// ---------------------------------------------------------------------------
// Immutable list operations
// ---------------------------------------------------------------------------

/// A new list with `item` appended.
pub fn append<T: Clone>(
    items: &[T],
    item: T,
) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// A new list with the element at `index` replaced.
pub fn replace_at<T: Clone>(
    items: &[T],
    index: usize,
    item: T,
) -> Result<Vec<T>, EditorError> {
    if index >= items.len() {
        return Err(EditorError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    let mut next = items.to_vec();
    next[index] = item;
    Ok(next)
}

/// A new list without the element at `index`.
pub fn remove_at<T: Clone>(
    items: &[T],
    index: usize,
) -> Result<Vec<T>, EditorError> {
    if index >= items.len() {
        return Err(EditorError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Part dialog fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartForm {
    pub description: String,
    pub part_number: String,
    pub quantity: String,
    pub net_price: String,
    /// Left blank to take the net price plus the configured part markup.
    pub list_price: String,
    pub taxable: bool,
}

impl LineItemForm for PartForm {
    type Item = PartItem;

    fn defaults(settings: &TaxMarkupSettings) -> Self {
        Self {
            quantity: "1".to_string(),
            taxable: settings.parts_taxable_by_default,
            ..Default::default()
        }
    }

    fn from_item(item: &PartItem) -> Self {
        Self {
            description: item.description.clone(),
            part_number: item.part_number.clone().unwrap_or_default(),
            quantity: decimal_text(item.quantity),
            net_price: decimal_text(item.net_price),
            list_price: decimal_text(item.list_price),
            taxable: item.taxable,
        }
    }

    fn build(
        &self,
        settings: &TaxMarkupSettings,
        _original: Option<&PartItem>,
    ) -> Result<PartItem, Vec<String>> {
        let net_price = parse_lenient(&self.net_price);
        let list_price = if self.list_price.trim().is_empty() {
            settings.marked_up_price(net_price)
        } else {
            parse_lenient(&self.list_price)
        };
        let part_number = self.part_number.trim();

        let item = PartItem {
            description: self.description.trim().to_string(),
            part_number: (!part_number.is_empty()).then(|| part_number.to_string()),
            quantity: parse_lenient(&self.quantity),
            net_price,
            list_price,
            taxable: self.taxable,
        };

        let errors = part_field_errors(&item);
        if errors.is_empty() { Ok(item) } else { Err(errors) }
    }
}

/// Labor dialog fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaborForm {
    pub description: String,
    pub duration_hours: String,
    /// One of the configured hourly rates.
    pub labor_rate: String,
    pub taxable: bool,
}

impl LineItemForm for LaborForm {
    type Item = LaborItem;

    fn defaults(settings: &TaxMarkupSettings) -> Self {
        Self {
            duration_hours: "1".to_string(),
            labor_rate: decimal_text(settings.default_hourly_rate),
            taxable: settings.labor_taxable_by_default,
            ..Default::default()
        }
    }

    fn from_item(item: &LaborItem) -> Self {
        Self {
            description: item.description.clone(),
            duration_hours: decimal_text(item.duration_hours),
            labor_rate: decimal_text(item.labor_rate),
            taxable: item.taxable,
        }
    }

    fn build(
        &self,
        settings: &TaxMarkupSettings,
        original: Option<&LaborItem>,
    ) -> Result<LaborItem, Vec<String>> {
        // Blank falls back to the default rate; anything else non-numeric is zero
        let labor_rate = if self.labor_rate.trim().is_empty() {
            settings.default_hourly_rate
        } else {
            parse_lenient(&self.labor_rate)
        };

        let item = LaborItem {
            description: self.description.trim().to_string(),
            duration_hours: parse_lenient(&self.duration_hours),
            labor_rate,
            taxable: self.taxable,
        };

        let mut errors = labor_field_errors(&item);
        // An item keeps its rate even if the shop has since retired it
        let kept_rate = original.is_some_and(|o| o.labor_rate == labor_rate);
        if !kept_rate && !settings.offers_rate(labor_rate) {
            errors.push(format!("Labor rate {labor_rate} is not one of the shop's rates"));
        }

        if errors.is_empty() { Ok(item) } else { Err(errors) }
    }
}

/// Flat fee dialog fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatFeeForm {
    pub description: String,
    pub price: String,
}

impl LineItemForm for FlatFeeForm {
    type Item = FlatFeeItem;

    fn defaults(_settings: &TaxMarkupSettings) -> Self {
        Self::default()
    }

    fn from_item(item: &FlatFeeItem) -> Self {
        Self {
            description: item.description.clone(),
            price: decimal_text(item.price),
        }
    }

    fn build(
        &self,
        _settings: &TaxMarkupSettings,
        _original: Option<&FlatFeeItem>,
    ) -> Result<FlatFeeItem, Vec<String>> {
        let item = FlatFeeItem {
            description: self.description.trim().to_string(),
            price: parse_lenient(&self.price),
        };

        let errors = flat_fee_field_errors(&item);
        if errors.is_empty() { Ok(item) } else { Err(errors) }
    }
}

pub type PartEditor = ItemEditor<PartForm>;
pub type LaborEditor = ItemEditor<LaborForm>;
pub type FlatFeeEditor = ItemEditor<FlatFeeForm>;
