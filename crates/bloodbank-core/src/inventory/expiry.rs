//! Default expiry policy by product type.

use chrono::{Days, NaiveDate};

use crate::models::ProductType;

/// Whole blood shelf life in days.
pub const WHOLE_BLOOD_SHELF_LIFE_DAYS: u64 = 35;

/// Platelet shelf life in days.
pub const PLATELETS_SHELF_LIFE_DAYS: u64 = 5;

/// Frozen plasma shelf life in days.
pub const PLASMA_SHELF_LIFE_DAYS: u64 = 365;

/// Red cell shelf life in days; also the fallback for unrecognized products.
pub const RED_BLOOD_CELLS_SHELF_LIFE_DAYS: u64 = 42;

/// Shelf life for a product type, in calendar days.
pub fn shelf_life_days(product: &ProductType) -> u64 {
    match product {
        ProductType::WholeBlood => WHOLE_BLOOD_SHELF_LIFE_DAYS,
        ProductType::Platelets => PLATELETS_SHELF_LIFE_DAYS,
        ProductType::Plasma => PLASMA_SHELF_LIFE_DAYS,
        ProductType::RedBloodCells | ProductType::Other(_) => RED_BLOOD_CELLS_SHELF_LIFE_DAYS,
    }
}

/// Default expiry date for a unit donated on `donation_date`.
///
/// This is a default, not a constraint: intake may override it. Saturates at
/// the largest representable date instead of failing.
pub fn compute_expiry(donation_date: NaiveDate, product: &ProductType) -> NaiveDate {
    donation_date
        .checked_add_days(Days::new(shelf_life_days(product)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_blood_expiry() {
        assert_eq!(compute_expiry(date(2024, 1, 1), &ProductType::WholeBlood), date(2024, 2, 5));
    }

    #[test]
    fn test_platelets_expiry() {
        assert_eq!(compute_expiry(date(2024, 2, 27), &ProductType::Platelets), date(2024, 3, 3));
    }

    #[test]
    fn test_plasma_expiry_crosses_leap_day() {
        // 2024 is a leap year: 365 days after Jan 1 is Dec 31
        assert_eq!(compute_expiry(date(2024, 1, 1), &ProductType::Plasma), date(2024, 12, 31));
        assert_eq!(compute_expiry(date(2023, 1, 1), &ProductType::Plasma), date(2024, 1, 1));
    }

    #[test]
    fn test_red_cells_and_unknown_fall_back_to_42_days() {
        let donated = date(2024, 1, 1);
        assert_eq!(compute_expiry(donated, &ProductType::RedBloodCells), date(2024, 2, 12));
        assert_eq!(
            compute_expiry(donated, &ProductType::Other("Cryo".to_string())),
            date(2024, 2, 12)
        );
    }

    #[test]
    fn test_expiry_saturates_at_max_date() {
        assert_eq!(compute_expiry(NaiveDate::MAX, &ProductType::Plasma), NaiveDate::MAX);
    }
}
