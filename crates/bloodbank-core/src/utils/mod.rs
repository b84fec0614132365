//! Utility functions for display formatting.

pub mod format;

pub use format::{column, format_date, format_liters, format_optional, truncate_string};
