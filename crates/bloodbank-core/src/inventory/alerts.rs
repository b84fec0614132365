//! Dashboard alert policy: low stock and units about to expire.
//!
//! The expiry window here is deliberately not the same predicate as
//! [`freshness::classify`]. The classifier treats a unit expiring today
//! (`days_left == 0`) as `ExpiringSoon`; the alert window is `0 < days_left <= 7`
//! and leaves such a unit out of the banner. Both checks are kept as-is at
//! their own call sites.

use chrono::{DateTime, Utc};

use super::aggregate::InventoryGroupSummary;
use super::freshness;
use crate::models::BloodUnit;

/// Groups holding less than this many liters are low on stock.
pub const LOW_STOCK_THRESHOLD_LITERS: f64 = 5.0;

/// Default look-ahead for the expiring-units banner, in days.
pub const EXPIRY_ALERT_WINDOW_DAYS: i64 = 7;

/// Summaries strictly below [`LOW_STOCK_THRESHOLD_LITERS`].
pub fn low_stock(summaries: &[InventoryGroupSummary]) -> Vec<InventoryGroupSummary> {
    summaries
        .iter()
        .filter(|s| s.amount < LOW_STOCK_THRESHOLD_LITERS)
        .copied()
        .collect()
}

/// Units expiring within `window_days`, excluding units that expire today or
/// have already expired.
pub fn expiring_within_window<'a>(
    units: &'a [BloodUnit],
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<&'a BloodUnit> {
    units
        .iter()
        .filter(|u| {
            let days_left = freshness::days_until_expiry(u.expiry_date, now);
            days_left <= window_days && days_left > 0
        })
        .collect()
}

/// Alert banner contents for one dashboard load.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryAlerts<'a> {
    pub low_stock: Vec<InventoryGroupSummary>,
    pub expiring: Vec<&'a BloodUnit>,
}

impl<'a> InventoryAlerts<'a> {
    pub fn evaluate(
        summaries: &[InventoryGroupSummary],
        units: &'a [BloodUnit],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            low_stock: low_stock(summaries),
            expiring: expiring_within_window(units, now, EXPIRY_ALERT_WINDOW_DAYS),
        }
    }

    pub fn has_alerts(&self) -> bool {
        !self.low_stock.is_empty() || !self.expiring.is_empty()
    }

    /// Banner text for the expiring-units alert, if any.
    pub fn expiring_message(&self) -> Option<String> {
        match self.expiring.len() {
            0 => None,
            1 => Some(format!(
                "1 blood unit expiring within {} days",
                EXPIRY_ALERT_WINDOW_DAYS
            )),
            n => Some(format!(
                "{} blood units expiring within {} days",
                n, EXPIRY_ALERT_WINDOW_DAYS
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::aggregate::test_support::{unit, unit_expiring};
    use super::super::aggregate::{aggregate, InventoryGroupSummary};
    use super::super::freshness::{classify, start_of_day, Freshness};
    use super::*;
    use crate::models::BloodGroup;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_low_stock_example_inventory() {
        let units = vec![
            unit(1, BloodGroup::OPositive, 2.0),
            unit(2, BloodGroup::OPositive, 1.5),
            unit(3, BloodGroup::APositive, 10.0),
        ];
        let low = low_stock(&aggregate(&units));
        assert_eq!(low.len(), 7);
        assert!(low.iter().any(|s| s.group == BloodGroup::OPositive));
        assert!(!low.iter().any(|s| s.group == BloodGroup::APositive));
    }

    #[test]
    fn test_low_stock_threshold_is_exclusive() {
        let summaries = vec![
            InventoryGroupSummary { group: BloodGroup::APositive, amount: 5.0, units: 10 },
            InventoryGroupSummary { group: BloodGroup::BPositive, amount: 4.99, units: 10 },
        ];
        let low = low_stock(&summaries);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].group, BloodGroup::BPositive);
    }

    #[test]
    fn test_expiring_today_excluded_from_window_but_soon_for_classifier() {
        let today = date(2024, 2, 5);
        let now = start_of_day(today);
        let units = vec![unit_expiring(1, today)];

        assert_eq!(
            classify(units[0].expiry_date, now),
            Freshness::ExpiringSoon { days_left: 0 }
        );
        assert!(expiring_within_window(&units, now, EXPIRY_ALERT_WINDOW_DAYS).is_empty());
    }

    #[test]
    fn test_expiring_window_bounds() {
        let now = start_of_day(date(2024, 2, 1));
        let units = vec![
            unit_expiring(1, date(2024, 1, 30)), // expired
            unit_expiring(2, date(2024, 2, 1)),  // today
            unit_expiring(3, date(2024, 2, 2)),  // 1 day
            unit_expiring(4, date(2024, 2, 8)),  // 7 days
            unit_expiring(5, date(2024, 2, 9)),  // 8 days
        ];

        let ids: Vec<i64> = expiring_within_window(&units, now, 7)
            .iter()
            .map(|u| u.blood_id)
            .collect();
        assert_eq!(ids, vec![3, 4]);

        let narrow: Vec<i64> = expiring_within_window(&units, now, 1)
            .iter()
            .map(|u| u.blood_id)
            .collect();
        assert_eq!(narrow, vec![3]);
    }

    #[test]
    fn test_evaluate_and_messages() {
        let now = start_of_day(date(2024, 2, 1)) + Duration::hours(9);
        let units = vec![
            unit_expiring(1, date(2024, 2, 3)),
            unit_expiring(2, date(2024, 2, 4)),
        ];
        let summaries = aggregate(&units);
        let alerts = InventoryAlerts::evaluate(&summaries, &units, now);

        assert!(alerts.has_alerts());
        assert_eq!(alerts.low_stock.len(), 8);
        assert_eq!(alerts.expiring.len(), 2);
        assert_eq!(
            alerts.expiring_message().as_deref(),
            Some("2 blood units expiring within 7 days")
        );
    }

    #[test]
    fn test_no_alerts_when_stocked_and_fresh() {
        let now = start_of_day(date(2024, 1, 2));
        let units: Vec<_> = BloodGroup::ALL
            .iter()
            .enumerate()
            .map(|(i, &g)| unit(i as i64, g, 5.0))
            .collect();
        let summaries = aggregate(&units);
        let alerts = InventoryAlerts::evaluate(&summaries, &units, now);
        assert!(!alerts.has_alerts());
        assert_eq!(alerts.expiring_message(), None);
    }
}
