use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A technician's diagnosis of a vehicle's reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: i64,
    pub vehicle_id: i64,
    #[serde(default)]
    pub customer_concern: String,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub recommended_repairs: String,
    pub technician_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// For creating new diagnostics (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewDiagnostic {
    pub vehicle_id: i64,
    pub customer_concern: String,
    pub findings: String,
    pub recommended_repairs: String,
    pub technician_name: Option<String>,
}

/// A free-form note a technician attaches to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianNote {
    pub id: i64,
    pub diagnostic_id: i64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTechnicianNote {
    pub author: String,
    pub body: String,
}
