use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The record store refused a login or create call. Carries the store's
    /// own message when it sent one.
    #[error("{0}")]
    Rejected(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut = (0..=MAX_ERROR_BODY_LENGTH)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
        }
    }

    /// Map a failed list/get response by status.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(truncated),
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Build a rejection from a JSON error body, reading `field` (usually
    /// `error`, `message` for login) and falling back to `fallback`.
    pub fn rejected(body: &str, field: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get(field).and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Rejected(message)
    }

    /// Whether this is the store refusing a request, as opposed to a transport
    /// or decoding failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_rejected_uses_error_field() {
        let err = ApiError::rejected(r#"{"error": "Donor not found"}"#, "error", "Failed to add blood record");
        assert_eq!(err.to_string(), "Donor not found");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rejected_falls_back() {
        let cases = ["", "<html>502</html>", r#"{"message": "nope"}"#, r#"{"error": ""}"#, r#"{"error": 5}"#];
        for body in cases {
            let err = ApiError::rejected(body, "error", "Failed to add donor");
            assert_eq!(err.to_string(), "Failed to add donor", "body: {body}");
        }
    }

    #[test]
    fn test_login_reads_message_field() {
        let err = ApiError::rejected(
            r#"{"message": "Invalid password"}"#,
            "message",
            "Invalid credentials. Please try again.",
        );
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(ref b) if b == "missing"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized(_)
        ));
        assert!(!ApiError::from_status(StatusCode::IM_A_TEAPOT, "").is_rejection());
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "é".repeat(400);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let msg = err.to_string();
        assert!(msg.contains("truncated, 800 total bytes"));
    }
}
