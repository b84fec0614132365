//! Donated blood units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blood::{Antigen, BloodGroup, ProductType};
use super::wire;

/// A stored blood unit as returned by the record store.
///
/// Units are immutable once created. Freshness is never stored on the record;
/// it depends on the current time and is derived by
/// [`crate::inventory::freshness::classify`] at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodUnit {
    #[serde(deserialize_with = "wire::id")]
    pub blood_id: i64,
    #[serde(default, deserialize_with = "wire::optional_int")]
    pub donor_id: Option<i64>,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub antigen: Antigen,
    #[serde(rename = "blood_type", default)]
    pub product_type: ProductType,
    /// Volume in liters.
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(deserialize_with = "wire::date")]
    pub donation_date: NaiveDate,
    #[serde(deserialize_with = "wire::date")]
    pub expiry_date: NaiveDate,
}

impl BloodUnit {
    /// Whether the stored expiry is the one the default shelf-life policy
    /// would assign, i.e. it was not overridden at intake.
    pub fn has_default_expiry(&self) -> bool {
        crate::inventory::expiry::compute_expiry(self.donation_date, &self.product_type)
            == self.expiry_date
    }
}

/// Body of a unit create request. The record store assigns `blood_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBloodUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<i64>,
    pub blood_group: BloodGroup,
    pub antigen: Antigen,
    #[serde(rename = "blood_type")]
    pub product_type: ProductType,
    pub amount: f64,
    pub donation_date: NaiveDate,
    pub expiry_date: NaiveDate,
}
