//! Client-side validation of create requests.
//!
//! Failures here are reported inline and the request is never sent.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{NewAdmin, NewDonor, NewDrive};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Smallest volume accepted for a single donation, in liters.
pub const MIN_DONATION_LITERS: f64 = 0.1;

/// Largest volume accepted for a single donation, in liters.
pub const MAX_DONATION_LITERS: f64 = 2.0;

/// Youngest accepted donor age.
pub const MIN_DONOR_AGE: u32 = 18;

/// Oldest accepted donor age.
pub const MAX_DONOR_AGE: u32 = 65;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Password must be at least {} characters long", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Amount must be between {} and {} liters", MIN_DONATION_LITERS, MAX_DONATION_LITERS)]
    AmountOutOfRange(f64),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Expiry date must be after the donation date")]
    ExpiryNotAfterDonation,

    #[error("{0} cannot be in the future")]
    FutureDate(&'static str),

    #[error("Drive date cannot be in the past")]
    DriveInPast,

    #[error("Donor age must be between {} and {}", MIN_DONOR_AGE, MAX_DONOR_AGE)]
    AgeOutOfRange(u32),
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Registration checks the confirmation before the length.
pub fn validate_registration(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    validate_password(password)
}

/// Per-donation volume bounds.
pub fn validate_donation_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || !(MIN_DONATION_LITERS..=MAX_DONATION_LITERS).contains(&amount) {
        return Err(ValidationError::AmountOutOfRange(amount));
    }
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub fn validate_new_admin(admin: &NewAdmin) -> Result<(), ValidationError> {
    require(&admin.name, "name")?;
    validate_password(&admin.password)
}

pub fn validate_new_donor(donor: &NewDonor, today: NaiveDate) -> Result<(), ValidationError> {
    require(&donor.name, "name")?;
    require(&donor.contact_number, "contact number")?;
    if !(MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(&donor.age) {
        return Err(ValidationError::AgeOutOfRange(donor.age));
    }
    if donor.dob > today {
        return Err(ValidationError::FutureDate("Date of birth"));
    }
    validate_donation_amount(donor.amount_donated)
}

pub fn validate_new_drive(drive: &NewDrive, today: NaiveDate) -> Result<(), ValidationError> {
    require(&drive.campus, "campus")?;
    require(&drive.venue, "venue")?;
    if drive.drive_date < today {
        return Err(ValidationError::DriveInPast);
    }
    match drive.total_amount {
        Some(total) if total < 0.0 => Err(ValidationError::NegativeAmount),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Antigen, BloodGroup, ProductType, Role};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_password_length() {
        assert_eq!(validate_password("12345"), Err(ValidationError::PasswordTooShort));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_registration_checks_mismatch_first() {
        assert_eq!(
            validate_registration("abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("abc", "abc"),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_registration("secret1", "secret1").is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            ValidationError::AmountOutOfRange(3.0).to_string(),
            "Amount must be between 0.1 and 2 liters"
        );
    }

    #[test]
    fn test_donation_amount_bounds() {
        assert!(validate_donation_amount(0.1).is_ok());
        assert!(validate_donation_amount(2.0).is_ok());
        assert!(validate_donation_amount(0.05).is_err());
        assert!(validate_donation_amount(2.5).is_err());
        assert!(validate_donation_amount(f64::NAN).is_err());
    }

    #[test]
    fn test_new_admin() {
        let admin = NewAdmin {
            name: "ops".to_string(),
            role: Role::Staff,
            campus: "Main".to_string(),
            department: "Health".to_string(),
            password: "short".to_string(),
        };
        assert_eq!(validate_new_admin(&admin), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn test_new_donor_age() {
        let donor = NewDonor {
            name: "Kim".to_string(),
            age: 17,
            gender: "Other".to_string(),
            department: "Art".to_string(),
            branch: "East".to_string(),
            dob: date(2007, 1, 1),
            blood_group: BloodGroup::APositive,
            antigen: Antigen::Positive,
            product_type: ProductType::WholeBlood,
            contact_number: "555".to_string(),
            amount_donated: 0.5,
            recorded_by: None,
        };
        let today = date(2024, 6, 1);
        assert_eq!(validate_new_donor(&donor, today), Err(ValidationError::AgeOutOfRange(17)));
        let adult = NewDonor { age: 18, ..donor };
        assert!(validate_new_donor(&adult, today).is_ok());
    }

    #[test]
    fn test_new_drive() {
        let today = date(2024, 6, 1);
        let drive = NewDrive {
            admin_id: Some(1),
            drive_date: today,
            campus: "Main".to_string(),
            venue: "Hall".to_string(),
            total_amount: None,
        };
        assert!(validate_new_drive(&drive, today).is_ok());

        let past = NewDrive { drive_date: date(2024, 5, 31), ..drive.clone() };
        assert_eq!(validate_new_drive(&past, today), Err(ValidationError::DriveInPast));

        let no_venue = NewDrive { venue: " ".to_string(), ..drive };
        assert_eq!(
            validate_new_drive(&no_venue, today),
            Err(ValidationError::MissingField("venue"))
        );
    }
}
