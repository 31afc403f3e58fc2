use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vehicle checked in at the shop, with the owner's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    #[serde(default)]
    pub vin: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub license_plate: String,
    pub mileage: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub intake_date: Option<NaiveDate>,
}

/// For creating new vehicles (no id)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewVehicle {
    pub vin: String,
    pub year: Option<i32>,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub mileage: Option<i64>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub intake_date: Option<NaiveDate>,
}

impl Vehicle {
    /// Short human label, e.g. `2019 Honda Civic (ABC123)`.
    pub fn display_name(&self) -> String {
        let mut name = match self.year {
            Some(year) => format!("{year} {} {}", self.make, self.model),
            None => format!("{} {}", self.make, self.model),
        };
        if !self.license_plate.is_empty() {
            name.push_str(&format!(" ({})", self.license_plate));
        }
        name.trim().to_string()
    }
}
