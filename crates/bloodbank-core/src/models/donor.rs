use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blood::{Antigen, BloodGroup, ProductType};
use super::wire;

/// A registered donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    #[serde(deserialize_with = "wire::id")]
    pub donor_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "wire::optional_int")]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub dob: Option<NaiveDate>,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub antigen: Antigen,
    /// Product type usually collected from this donor.
    #[serde(rename = "blood_type", default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Cumulative donated volume in liters.
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount_donated: f64,
    #[serde(default, deserialize_with = "wire::optional_int")]
    pub recorded_by: Option<i64>,
}

impl Donor {
    /// Case-insensitive match on name or department, plain substring match on
    /// the contact number. An empty query matches everyone.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .contact_number
                .as_deref()
                .map(|c| c.contains(query))
                .unwrap_or(false)
            || self
                .department
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }

    pub fn display_label(&self) -> String {
        format!("{} - {} ({})", self.donor_id, self.name, self.blood_group)
    }
}

/// Body of a donor create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDonor {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub department: String,
    pub branch: String,
    pub dob: NaiveDate,
    pub blood_group: BloodGroup,
    pub antigen: Antigen,
    #[serde(rename = "blood_type")]
    pub product_type: ProductType,
    pub contact_number: String,
    pub amount_donated: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<i64>,
}
