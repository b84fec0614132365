//! Stock levels by blood group.

use serde::Serialize;

use crate::models::{BloodGroup, BloodUnit};

/// Volume and unit count held for one blood group. Recomputed per query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryGroupSummary {
    pub group: BloodGroup,
    /// Total volume in liters.
    pub amount: f64,
    /// Number of units.
    pub units: usize,
}

/// Summaries for all eight groups in canonical order, including empty ones.
pub fn aggregate(units: &[BloodUnit]) -> Vec<InventoryGroupSummary> {
    aggregate_groups(units, &BloodGroup::ALL)
}

/// Summaries for `groups`, in the order given.
pub fn aggregate_groups(units: &[BloodUnit], groups: &[BloodGroup]) -> Vec<InventoryGroupSummary> {
    groups
        .iter()
        .map(|&group| {
            let (amount, count) = units
                .iter()
                .filter(|u| u.blood_group == group)
                .fold((0.0, 0), |(amount, count), u| (amount + u.amount, count + 1));
            InventoryGroupSummary {
                group,
                amount,
                units: count,
            }
        })
        .collect()
}

/// Total volume across summaries.
pub fn total_volume(summaries: &[InventoryGroupSummary]) -> f64 {
    summaries.iter().map(|s| s.amount).sum()
}

/// Total unit count across summaries.
pub fn total_units(summaries: &[InventoryGroupSummary]) -> usize {
    summaries.iter().map(|s| s.units).sum()
}
