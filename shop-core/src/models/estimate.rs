use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::line_item::{FlatFeeItem, LaborItem, PartItem};

/// Whether the customer has authorized the work on an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[default]
    Pending,
    Approved,
    #[serde(rename = "Not Approved", alias = "NotApproved", alias = "not_approved")]
    NotApproved,
}

impl AuthorizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::NotApproved => "Not Approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "not approved" | "not_approved" | "notapproved" => Some(Self::NotApproved),
            _ => None,
        }
    }
}

/// An estimate as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: i64,
    pub vehicle_id: i64,
    pub diagnostic_id: i64,

    #[serde(default)]
    pub parts: Vec<PartItem>,
    #[serde(default)]
    pub labors: Vec<LaborItem>,
    #[serde(default)]
    pub flat_fees: Vec<FlatFeeItem>,

    #[serde(default)]
    pub customer_note: String,
    #[serde(default)]
    pub technician_note: Option<String>,

    // Totals as persisted; recomputed locally whenever the estimate is edited
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub tax: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total: Decimal,

    #[serde(default)]
    pub authorization_status: AuthorizationStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether a draft will be created or will update an existing estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateMode {
    Create,
    Update { estimate_id: i64 },
}

/// The estimate aggregate while it is being edited.
///
/// Owned by a single editor; every line-item change goes through the
/// immutable list operations in [`crate::editor`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EstimateDraft {
    pub estimate_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub diagnostic_id: Option<i64>,
    pub parts: Vec<PartItem>,
    pub labors: Vec<LaborItem>,
    pub flat_fees: Vec<FlatFeeItem>,
    pub customer_note: String,
    pub technician_note: Option<String>,
    pub authorization_status: AuthorizationStatus,
}

impl EstimateDraft {
    /// An empty draft for a new estimate on the given vehicle and diagnostic.
    pub fn new(
        vehicle_id: Option<i64>,
        diagnostic_id: Option<i64>,
    ) -> Self {
        Self {
            vehicle_id,
            diagnostic_id,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> EstimateMode {
        match self.estimate_id {
            Some(estimate_id) => EstimateMode::Update { estimate_id },
            None => EstimateMode::Create,
        }
    }

    /// Number of line items across parts, labor and flat fees.
    pub fn line_item_count(&self) -> usize {
        self.parts.len() + self.labors.len() + self.flat_fees.len()
    }
}

impl From<&Estimate> for EstimateDraft {
    fn from(estimate: &Estimate) -> Self {
        Self {
            estimate_id: Some(estimate.id),
            vehicle_id: Some(estimate.vehicle_id),
            diagnostic_id: Some(estimate.diagnostic_id),
            parts: estimate.parts.clone(),
            labors: estimate.labors.clone(),
            flat_fees: estimate.flat_fees.clone(),
            customer_note: estimate.customer_note.clone(),
            technician_note: estimate.technician_note.clone(),
            authorization_status: estimate.authorization_status,
        }
    }
}
