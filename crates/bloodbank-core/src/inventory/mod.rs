//! Inventory lifecycle engine.
//!
//! Pure functions over unit records:
//!
//! - [`expiry`]: default expiry from donation date and product type
//! - [`freshness`]: Fresh / ExpiringSoon / Expired relative to an explicit `now`
//! - [`aggregate`]: per-group volume and unit counts
//! - [`alerts`]: low-stock and expiring-unit banners
//! - [`draft`]: intake form state for a new unit
//!
//! Nothing here performs I/O or reads the clock.

pub mod aggregate;
pub mod alerts;
pub mod draft;
pub mod expiry;
pub mod freshness;

pub use aggregate::{aggregate, aggregate_groups, total_units, total_volume, InventoryGroupSummary};
pub use alerts::{
    expiring_within_window, low_stock, InventoryAlerts, EXPIRY_ALERT_WINDOW_DAYS,
    LOW_STOCK_THRESHOLD_LITERS,
};
pub use draft::UnitDraft;
pub use expiry::{compute_expiry, shelf_life_days};
pub use freshness::{classify, days_until_expiry, start_of_day, Freshness, EXPIRING_SOON_DAYS};
