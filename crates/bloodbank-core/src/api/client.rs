//! API client for the blood bank record store.
//!
//! This module provides the `ApiClient` struct for listing and creating
//! admins, donors, blood units and donation drives.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{
    wire, Admin, BloodUnit, Donor, Drive, NewAdmin, NewBloodUnit, NewDonor, NewDrive,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const ADD_ADMIN_FAILED: &str = "Failed to add admin";
const ADD_DONOR_FAILED: &str = "Failed to add donor";
const ADD_UNIT_FAILED: &str = "Failed to add blood record";
const ADD_DRIVE_FAILED: &str = "Failed to create drive";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    admin: Option<Admin>,
}

/// API client for the record store.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ===== Request helpers =====

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// GET a JSON array, keeping the elements that decode.
    async fn get_list<T: DeserializeOwned>(&self, path: &str, kind: &str) -> Result<Vec<T>> {
        let values: Vec<Value> = self.get(path).await?;
        let total = values.len();
        let records = wire::decode_records(kind, values);
        debug!(kind, total, decoded = records.len(), "Fetched list");
        Ok(records)
    }

    /// POST a create request. A non-success status becomes
    /// [`ApiError::Rejected`] carrying the body's `field` or `fallback`.
    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        field: &str,
        fallback: &str,
    ) -> Result<Value> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(url = %url, status = %status, "Request rejected");
            return Err(ApiError::rejected(&body, field, fallback).into());
        }

        // Some creates answer with an empty body
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", url))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Admins =====

    /// Log in by admin name and password, returning the admin record.
    pub async fn login(&self, name: &str, password: &str) -> Result<Admin> {
        let body = self
            .post("admins/login", &LoginRequest { name, password }, "message", INVALID_CREDENTIALS)
            .await?;
        let admin = parse_login_response(body)?;
        info!(admin = %admin.name, role = %admin.role, "Logged in");
        Ok(admin)
    }

    /// Self-registration. Same endpoint as admin creation, different fallback message.
    pub async fn register(&self, admin: &NewAdmin) -> Result<()> {
        self.post("admins", admin, "error", REGISTRATION_FAILED).await?;
        info!(name = %admin.name, "Registered admin account");
        Ok(())
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<()> {
        self.post("admins", admin, "error", ADD_ADMIN_FAILED).await?;
        info!(name = %admin.name, role = %admin.role, "Created admin");
        Ok(())
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>> {
        self.get_list("admins", "admin").await
    }

    // ===== Donors =====

    pub async fn list_donors(&self) -> Result<Vec<Donor>> {
        self.get_list("donors", "donor").await
    }

    pub async fn get_donor(&self, donor_id: i64) -> Result<Donor> {
        self.get(&format!("donors/{}", donor_id)).await
    }

    pub async fn create_donor(&self, donor: &NewDonor) -> Result<()> {
        self.post("donors", donor, "error", ADD_DONOR_FAILED).await?;
        info!(name = %donor.name, group = %donor.blood_group, "Created donor");
        Ok(())
    }

    // ===== Blood units =====

    pub async fn list_units(&self) -> Result<Vec<BloodUnit>> {
        self.get_list("blood", "blood unit").await
    }

    pub async fn create_unit(&self, unit: &NewBloodUnit) -> Result<()> {
        self.post("blood", unit, "error", ADD_UNIT_FAILED).await?;
        info!(
            group = %unit.blood_group,
            product = %unit.product_type,
            amount = unit.amount,
            expiry = %unit.expiry_date,
            "Created blood unit"
        );
        Ok(())
    }

    // ===== Drives =====

    pub async fn list_drives(&self) -> Result<Vec<Drive>> {
        self.get_list("drives", "drive").await
    }

    pub async fn create_drive(&self, drive: &NewDrive) -> Result<()> {
        self.post("drives", drive, "error", ADD_DRIVE_FAILED).await?;
        info!(date = %drive.drive_date, campus = %drive.campus, "Created drive");
        Ok(())
    }
}

/// A 2xx login answer without an `admin` object is still a failed login.
fn parse_login_response(body: Value) -> Result<Admin> {
    let parsed: LoginResponse = serde_json::from_value(body).unwrap_or(LoginResponse { admin: None });
    parsed
        .admin
        .ok_or_else(|| ApiError::Rejected(LOGIN_FAILED.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use serde_json::json;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("donors"), "http://localhost:5000/api/donors");
        assert_eq!(client.url("/donors/7"), "http://localhost:5000/api/donors/7");
    }

    #[test]
    fn test_parse_login_response() {
        let admin = parse_login_response(json!({
            "admin": {"admin_id": "4", "name": "asha", "role": "Staff"}
        }))
        .unwrap();
        assert_eq!(admin.admin_id, 4);
        assert_eq!(admin.role, Role::Staff);
    }

    #[test]
    fn test_login_without_admin_is_rejected() {
        for body in [json!({}), json!({"admin": null}), Value::Null, json!({"admin": "x"})] {
            let err = parse_login_response(body).unwrap_err();
            let api_err = err.downcast_ref::<ApiError>().expect("should be ApiError");
            assert!(api_err.is_rejection());
            assert_eq!(api_err.to_string(), LOGIN_FAILED);
        }
    }

    #[test]
    fn test_create_request_bodies_are_snake_case() {
        let drive = NewDrive {
            admin_id: Some(2),
            drive_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            campus: "Main".to_string(),
            venue: "Hall A".to_string(),
            total_amount: None,
        };
        let body = serde_json::to_value(&drive).unwrap();
        assert_eq!(body["drive_date"], "2024-07-01");
        assert_eq!(body["admin_id"], 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_is_an_error() {
        let client = ApiClient::new("http://127.0.0.1:1/api").unwrap();
        let err = client.list_units().await.unwrap_err();
        assert!(err.to_string().contains("Failed to send GET request"));
        // Transport failures are not store responses
        assert!(err.downcast_ref::<ApiError>().is_none());
        assert!(err.chain().any(|cause| cause.downcast_ref::<reqwest::Error>().is_some()));
    }
}
