//! Error taxonomy shared by the engine and the transport.
//!
//! | Type | Surfaced as |
//! |------|-------------|
//! | [`FetchError`] | inline banner (network) or the server's own message (non-2xx) |
//! | [`AuthError`] | a redirect away from the page, never a UI error |
//! | [`ValidationError`] | inline form error; the request is never sent |

use serde_json::Value;
use thiserror::Error;

use crate::models::Role;

/// A failed call to the backend gateway.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("Cannot load data: {0}")]
    Network(String),
    /// The gateway answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The body could not be decoded into the expected shape.
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
}

impl FetchError {
    /// Build a [`FetchError::Server`] from a non-2xx response, keeping the
    /// server's message when the body carries one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|body| detail_message(&body))
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        FetchError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 both mean the session cannot see this resource.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Extract a human-readable message from an error body.
///
/// Accepts `{"detail": "..."}`, validation lists `{"detail": [{"msg": "..."}]}`
/// and `{"error": "..."}`.
fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => {
            return Some(detail.clone());
        }
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    body.get("error")
        .and_then(Value::as_str)
        .filter(|error| !error.trim().is_empty())
        .map(str::to_string)
}

/// Why the session guard refused the page.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Not signed in")]
    Unauthenticated,
    #[error("This page requires the {required} role (signed in as {actual})")]
    Forbidden { required: Role, actual: Role },
    #[error(transparent)]
    Unreachable(#[from] FetchError),
}

/// Client-side form validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{field} must be a whole number of zero or more")]
    InvalidNumber { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_kept_verbatim() {
        let err = FetchError::from_response(404, r#"{"detail": "Clinic not found"}"#);
        assert_eq!(
            err,
            FetchError::Server {
                status: 404,
                message: "Clinic not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "Clinic not found");
    }

    #[test]
    fn test_validation_list_is_joined() {
        let body = r#"{"detail": [{"msg": "field required"}, {"msg": "too short"}]}"#;
        let err = FetchError::from_response(422, body);
        assert_eq!(err.to_string(), "field required; too short");
    }

    #[test]
    fn test_error_field_and_generic_fallback() {
        let err = FetchError::from_response(500, r#"{"error": "Database query failed"}"#);
        assert_eq!(err.to_string(), "Database query failed");

        let err = FetchError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");

        let err = FetchError::from_response(500, r#"{"detail": ""}"#);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_unauthorized_statuses() {
        assert!(FetchError::from_response(401, "").is_unauthorized());
        assert!(FetchError::from_response(403, "").is_unauthorized());
        assert!(!FetchError::from_response(500, "").is_unauthorized());
        assert!(!FetchError::Network("offline".into()).is_unauthorized());
    }
}
