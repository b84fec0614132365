use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wire;

/// A scheduled or completed donation drive. Display data only: collected
/// totals are never reconciled against unit inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    #[serde(deserialize_with = "wire::id")]
    pub drive_id: i64,
    #[serde(default, deserialize_with = "wire::optional_int")]
    pub admin_id: Option<i64>,
    #[serde(deserialize_with = "wire::date")]
    pub drive_date: NaiveDate,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub venue: String,
    /// Collected (or expected) volume in liters, when recorded.
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub total_amount: Option<f64>,
}

impl Drive {
    /// Drives happening today count as upcoming.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.drive_date >= today
    }
}

/// Body of a drive create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrive {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    pub drive_date: NaiveDate,
    pub campus: String,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drive_without_total() {
        let json = r#"{
            "drive_id": 4,
            "admin_id": 1,
            "drive_date": "2024-06-15",
            "campus": "Main",
            "venue": "Student Center",
            "total_amount": ""
        }"#;

        let drive: Drive = serde_json::from_str(json).expect("drive should decode");
        assert_eq!(drive.drive_id, 4);
        assert_eq!(drive.total_amount, None);
        assert_eq!(drive.venue, "Student Center");
    }

    #[test]
    fn test_is_upcoming_includes_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let drive = Drive {
            drive_id: 1,
            admin_id: None,
            drive_date: today,
            campus: String::new(),
            venue: String::new(),
            total_amount: Some(12.0),
        };
        assert!(drive.is_upcoming(today));
        assert!(!drive.is_upcoming(today.succ_opt().unwrap()));
    }
}
