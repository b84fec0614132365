//! In-progress unit intake.
//!
//! A [`UnitDraft`] mirrors the intake form: the expiry date follows the
//! donation date and product type until someone types over it, and picking a
//! donor pre-fills the classification fields without locking them.

use chrono::NaiveDate;
use tracing::debug;

use super::expiry::compute_expiry;
use crate::models::{Antigen, BloodGroup, Donor, NewBloodUnit, ProductType};
use crate::validation::{validate_donation_amount, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDraft {
    donor_id: Option<i64>,
    pub blood_group: BloodGroup,
    pub antigen: Antigen,
    product_type: ProductType,
    pub amount: Option<f64>,
    donation_date: Option<NaiveDate>,
    expiry_date: Option<NaiveDate>,
    expiry_overridden: bool,
}

impl Default for UnitDraft {
    fn default() -> Self {
        Self {
            donor_id: None,
            blood_group: BloodGroup::OPositive,
            antigen: Antigen::Positive,
            product_type: ProductType::WholeBlood,
            amount: None,
            donation_date: None,
            expiry_date: None,
            expiry_overridden: false,
        }
    }
}

impl UnitDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute the unit to a donor, copying the donor's blood group, antigen
    /// and usual product type. Passing `None` detaches the donor and keeps the
    /// current field values.
    pub fn select_donor(&mut self, donor: Option<&Donor>) {
        match donor {
            Some(donor) => {
                self.donor_id = Some(donor.donor_id);
                self.blood_group = donor.blood_group;
                self.antigen = donor.antigen;
                self.set_product_type(donor.product_type.clone());
            }
            None => self.donor_id = None,
        }
    }

    pub fn set_donation_date(&mut self, date: NaiveDate) {
        if self.donation_date == Some(date) {
            return;
        }
        self.donation_date = Some(date);
        self.recompute_expiry();
    }

    pub fn set_product_type(&mut self, product: ProductType) {
        if self.product_type == product {
            return;
        }
        self.product_type = product;
        self.recompute_expiry();
    }

    /// Override the computed expiry. The override holds until the donation
    /// date or product type changes again.
    pub fn set_expiry_date(&mut self, date: NaiveDate) {
        self.expiry_date = Some(date);
        self.expiry_overridden = true;
    }

    fn recompute_expiry(&mut self) {
        if let Some(donated) = self.donation_date {
            let expiry = compute_expiry(donated, &self.product_type);
            debug!(%donated, product = %self.product_type, %expiry, "Recomputed default expiry");
            self.expiry_date = Some(expiry);
            self.expiry_overridden = false;
        }
    }

    pub fn donor_id(&self) -> Option<i64> {
        self.donor_id
    }

    pub fn product_type(&self) -> &ProductType {
        &self.product_type
    }

    pub fn donation_date(&self) -> Option<NaiveDate> {
        self.donation_date
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    pub fn is_expiry_overridden(&self) -> bool {
        self.expiry_overridden
    }

    /// Validate the draft and build the create request.
    ///
    /// `today` bounds the donation date; units cannot be recorded ahead of time.
    pub fn submit(&self, today: NaiveDate) -> Result<NewBloodUnit, ValidationError> {
        let amount = self.amount.ok_or(ValidationError::MissingField("amount"))?;
        validate_donation_amount(amount)?;
        let donation_date = self
            .donation_date
            .ok_or(ValidationError::MissingField("donation date"))?;
        let expiry_date = self
            .expiry_date
            .ok_or(ValidationError::MissingField("expiry date"))?;
        if donation_date > today {
            return Err(ValidationError::FutureDate("Donation date"));
        }
        if expiry_date <= donation_date {
            return Err(ValidationError::ExpiryNotAfterDonation);
        }

        Ok(NewBloodUnit {
            donor_id: self.donor_id,
            blood_group: self.blood_group,
            antigen: self.antigen,
            product_type: self.product_type.clone(),
            amount,
            donation_date,
            expiry_date,
        })
    }
}
