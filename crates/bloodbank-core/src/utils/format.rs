use chrono::NaiveDate;

/// Format a volume in liters with two decimals, e.g. "3.50 L"
pub fn format_liters(amount: f64) -> String {
    format!("{:.2} L", amount)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or blank
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Format a date for display, e.g. "Feb 05, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Pad or truncate to an exact column width for plain-text tables
pub fn column(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate_string(s, width), width = width)
}
