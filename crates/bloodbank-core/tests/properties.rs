//! Property tests for the inventory engine.

use bloodbank_core::inventory::{
    aggregate, classify, compute_expiry, days_until_expiry, expiring_within_window, low_stock,
    shelf_life_days, start_of_day, Freshness, InventoryGroupSummary, EXPIRING_SOON_DAYS,
    LOW_STOCK_THRESHOLD_LITERS,
};
use bloodbank_core::models::{Antigen, BloodGroup, BloodUnit, ProductType};
use chrono::{Days, Duration, NaiveDate};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 through roughly 2054
    (0u64..20_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(offset)
    })
}

fn any_product() -> impl Strategy<Value = ProductType> {
    prop_oneof![
        Just(ProductType::WholeBlood),
        Just(ProductType::Plasma),
        Just(ProductType::Platelets),
        Just(ProductType::RedBloodCells),
        "[A-Za-z ]{1,12}".prop_map(ProductType::from),
    ]
}

fn any_group() -> impl Strategy<Value = BloodGroup> {
    (0usize..8).prop_map(|i| BloodGroup::ALL[i])
}

fn any_unit() -> impl Strategy<Value = BloodUnit> {
    (1i64..10_000, any_group(), 0.0f64..2.0, any_date()).prop_map(|(id, group, amount, donated)| {
        BloodUnit {
            blood_id: id,
            donor_id: None,
            blood_group: group,
            antigen: Antigen::Positive,
            product_type: ProductType::WholeBlood,
            amount,
            donation_date: donated,
            expiry_date: compute_expiry(donated, &ProductType::WholeBlood),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]

    /// Expiry minus donation date is exactly the product's shelf life.
    #[test]
    fn expiry_delta_matches_shelf_life(donated in any_date(), product in any_product()) {
        let expiry = compute_expiry(donated, &product);
        let delta = (expiry - donated).num_days();
        prop_assert_eq!(delta as u64, shelf_life_days(&product));
    }

    /// Each classification holds exactly on its day range.
    #[test]
    fn classifier_partitions_days_left(
        expiry in any_date(),
        day_offset in -60i64..60,
        seconds in 0i64..86_400,
    ) {
        let now = start_of_day(expiry) + Duration::days(day_offset) + Duration::seconds(seconds);
        let days_left = days_until_expiry(expiry, now);

        match classify(expiry, now) {
            Freshness::Expired { days_overdue } => {
                prop_assert!(days_left < 0);
                prop_assert_eq!(days_overdue, -days_left);
            }
            Freshness::ExpiringSoon { days_left: shown } => {
                prop_assert!((0..=EXPIRING_SOON_DAYS).contains(&days_left));
                prop_assert_eq!(shown, days_left);
            }
            Freshness::Fresh => prop_assert!(days_left > EXPIRING_SOON_DAYS),
        }
    }

    /// Days left is the ceiling of the remaining time in days.
    #[test]
    fn days_left_rounds_up(expiry in any_date(), minutes_before in -100_000i64..100_000) {
        let now = start_of_day(expiry) - Duration::minutes(minutes_before);
        let days_left = days_until_expiry(expiry, now);
        let exact = minutes_before as f64 / (24.0 * 60.0);
        prop_assert_eq!(days_left, exact.ceil() as i64);
    }

    /// Aggregation covers all eight groups and conserves volume and count.
    #[test]
    fn aggregate_conserves_totals(units in prop::collection::vec(any_unit(), 0..60)) {
        let summaries = aggregate(&units);
        prop_assert_eq!(summaries.len(), 8);

        let groups: Vec<BloodGroup> = summaries.iter().map(|s| s.group).collect();
        prop_assert_eq!(groups, BloodGroup::ALL.to_vec());

        let input_sum: f64 = units.iter().map(|u| u.amount).sum();
        let output_sum: f64 = summaries.iter().map(|s| s.amount).sum();
        prop_assert!((input_sum - output_sum).abs() < 1e-6);

        let counted: usize = summaries.iter().map(|s| s.units).sum();
        prop_assert_eq!(counted, units.len());
    }

    /// Low stock is exactly the summaries under the threshold, in order.
    #[test]
    fn low_stock_is_exact(amounts in prop::collection::vec(0.0f64..10.0, 8)) {
        let summaries: Vec<InventoryGroupSummary> = BloodGroup::ALL
            .iter()
            .zip(&amounts)
            .map(|(&group, &amount)| InventoryGroupSummary { group, amount, units: 1 })
            .collect();

        let expected: Vec<InventoryGroupSummary> = summaries
            .iter()
            .filter(|s| s.amount < LOW_STOCK_THRESHOLD_LITERS)
            .copied()
            .collect();
        prop_assert_eq!(low_stock(&summaries), expected);
    }

    /// The alert window never includes units expiring today or earlier.
    #[test]
    fn alert_window_excludes_day_zero(
        units in prop::collection::vec(any_unit(), 0..30),
        today in any_date(),
    ) {
        let now = start_of_day(today);
        for unit in expiring_within_window(&units, now, 7) {
            let days_left = days_until_expiry(unit.expiry_date, now);
            prop_assert!(days_left > 0 && days_left <= 7);
            prop_assert!(unit.expiry_date > today);
        }
    }
}
