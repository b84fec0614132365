//! Dashboard view-state.
//!
//! A [`DashboardSnapshot`] is one concurrent fetch of donors, units and
//! drives. Everything shown on screen is derived from a snapshot and an
//! explicit `now`, so the same inputs always render the same dashboard.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::inventory::{
    aggregate, classify, total_units, total_volume, Freshness, InventoryAlerts,
    InventoryGroupSummary,
};
use crate::models::{BloodGroup, BloodUnit, Donor, Drive};

/// Donors shown in the "recent donors" panel.
pub const RECENT_DONORS_LIMIT: usize = 5;

/// Drives shown in the "upcoming drives" panel.
pub const UPCOMING_DRIVES_LIMIT: usize = 5;

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub donors: Vec<Donor>,
    pub units: Vec<BloodUnit>,
    pub drives: Vec<Drive>,
}

impl DashboardSnapshot {
    /// Fetch all three lists concurrently. A list that fails to load is shown
    /// as empty; the failure is logged and not retried.
    pub async fn fetch(api: &ApiClient) -> Self {
        let (donors, units, drives) =
            tokio::join!(api.list_donors(), api.list_units(), api.list_drives());

        let snapshot = Self {
            donors: or_empty("donors", donors),
            units: or_empty("blood units", units),
            drives: or_empty("drives", drives),
        };
        debug!(
            donors = snapshot.donors.len(),
            units = snapshot.units.len(),
            drives = snapshot.drives.len(),
            "Dashboard snapshot loaded"
        );
        snapshot
    }
}

/// A failed list fetch shows as an empty list. Logged, never retried.
pub fn or_empty<T>(kind: &str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(kind, error = %e, "Failed to fetch list, showing it as empty");
            Vec::new()
        }
    }
}

// ============================================================================
// Overview
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_donors: usize,
    /// Liters across all groups.
    pub total_volume: f64,
    pub total_units: usize,
    pub total_drives: usize,
    pub upcoming_drives: usize,
}

/// Everything the overview screen shows for one snapshot.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub stats: DashboardStats,
    pub inventory_by_group: Vec<InventoryGroupSummary>,
    pub alerts: InventoryAlerts<'a>,
    pub recent_donors: Vec<&'a Donor>,
    pub upcoming_drives: Vec<&'a Drive>,
}

impl<'a> DashboardView<'a> {
    pub fn build(snapshot: &'a DashboardSnapshot, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let inventory_by_group = aggregate(&snapshot.units);
        let alerts = InventoryAlerts::evaluate(&inventory_by_group, &snapshot.units, now);
        let (upcoming, _) = split_drives(&snapshot.drives, today);

        let stats = DashboardStats {
            total_donors: snapshot.donors.len(),
            total_volume: total_volume(&inventory_by_group),
            total_units: total_units(&inventory_by_group),
            total_drives: snapshot.drives.len(),
            upcoming_drives: upcoming.len(),
        };

        Self {
            stats,
            inventory_by_group,
            alerts,
            recent_donors: recent_donors(&snapshot.donors, RECENT_DONORS_LIMIT),
            upcoming_drives: upcoming.into_iter().take(UPCOMING_DRIVES_LIMIT).collect(),
        }
    }
}

/// Newest donors first, by donor id.
pub fn recent_donors(donors: &[Donor], limit: usize) -> Vec<&Donor> {
    let mut sorted: Vec<&Donor> = donors.iter().collect();
    sorted.sort_by(|a, b| b.donor_id.cmp(&a.donor_id));
    sorted.truncate(limit);
    sorted
}

// ============================================================================
// Listings
// ============================================================================

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow<'a> {
    pub unit: &'a BloodUnit,
    pub freshness: Freshness,
}

/// Units in store order, optionally restricted to one group, each with its
/// freshness at `now`.
pub fn inventory_rows(
    units: &[BloodUnit],
    group: Option<BloodGroup>,
    now: DateTime<Utc>,
) -> Vec<InventoryRow<'_>> {
    units
        .iter()
        .filter(|u| group.map_or(true, |g| u.blood_group == g))
        .map(|unit| InventoryRow {
            unit,
            freshness: classify(unit.expiry_date, now),
        })
        .collect()
}

/// Liters across rows that are not yet expired.
pub fn usable_volume(rows: &[InventoryRow<'_>]) -> f64 {
    rows.iter()
        .filter(|r| r.freshness.is_usable())
        .map(|r| r.unit.amount)
        .sum()
}

/// Donors matching `query` (see [`Donor::matches_search`]) and, if given,
/// exactly `group`.
pub fn filter_donors<'a>(
    donors: &'a [Donor],
    query: &str,
    group: Option<BloodGroup>,
) -> Vec<&'a Donor> {
    donors
        .iter()
        .filter(|d| d.matches_search(query))
        .filter(|d| group.map_or(true, |g| d.blood_group == g))
        .collect()
}

/// Split drives into `(upcoming, past)`. Upcoming is soonest first, past is
/// most recent first. Drives on `today` are upcoming.
pub fn split_drives(drives: &[Drive], today: NaiveDate) -> (Vec<&Drive>, Vec<&Drive>) {
    let (mut upcoming, mut past): (Vec<&Drive>, Vec<&Drive>) =
        drives.iter().partition(|d| d.is_upcoming(today));
    upcoming.sort_by_key(|d| d.drive_date);
    past.sort_by(|a, b| b.drive_date.cmp(&a.drive_date));
    (upcoming, past)
}
