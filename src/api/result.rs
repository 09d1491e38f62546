//! Uniform outcome of a back-office API call

use std::fmt;

use http::StatusCode;
use serde::Deserialize;

/// Message used when an auth-required call finds no persisted session
pub(crate) const MISSING_TOKEN_MESSAGE: &str = "Invalid or missing access token";
/// Message used when the session could not be renewed
pub(crate) const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

pub(crate) const DEFAULT_SUCCESS_MESSAGE: &str = "Request successful";
pub(crate) const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Why a call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No usable session; nothing was sent
    Unauthenticated,
    /// The session could not be renewed and has been discarded
    SessionExpired,
    /// 2xx response whose envelope reported `success: false`
    Rejected,
    /// Non-2xx response
    Http,
    /// Connection, timeout or other transport error
    Transport,
    /// Response body did not match the expected shape
    Decode,
    /// The local session file could not be written
    Storage,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unauthenticated => write!(f, "unauthenticated"),
            FailureKind::SessionExpired => write!(f, "session expired"),
            FailureKind::Rejected => write!(f, "rejected"),
            FailureKind::Http => write!(f, "http error"),
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Decode => write!(f, "invalid response"),
            FailureKind::Storage => write!(f, "session storage error"),
        }
    }
}

/// Failed call, normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub message: String,
    pub status: Option<u16>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}, status {})", self.message, self.kind, status),
            None => write!(f, "{} ({})", self.message, self.kind),
        }
    }
}

impl std::error::Error for ApiFailure {}

impl ApiFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
        }
    }

    /// Whether the operator has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Unauthenticated | FailureKind::SessionExpired
        )
    }
}

/// Outcome of [`ApiClient::request`](super::ApiClient::request)
///
/// Carries the `{ success, message, data?, statusCode? }` shape as two explicit variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success {
        message: String,
        data: Option<T>,
        status: u16,
    },
    Failure(ApiFailure),
}

impl<T> ApiResult<T> {
    pub(crate) fn failure(kind: FailureKind, message: impl Into<String>, status: Option<u16>) -> Self {
        ApiResult::Failure(ApiFailure::new(kind, message, status))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ApiResult::Success { message, .. } => message,
            ApiResult::Failure(failure) => &failure.message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiResult::Success { status, .. } => Some(*status),
            ApiResult::Failure(failure) => failure.status,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Success { data, .. } => data.as_ref(),
            ApiResult::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&ApiFailure> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::Failure(failure) => Some(failure),
        }
    }

    /// Payload of a successful call, `None` for failures and empty payloads alike
    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResult::Success { data, .. } => data,
            ApiResult::Failure(_) => None,
        }
    }

    /// Payload of a successful call; an empty payload counts as a failure
    pub fn into_required(self) -> Result<T, ApiFailure> {
        match self {
            ApiResult::Success {
                data: Some(data), ..
            } => Ok(data),
            ApiResult::Success { status, .. } => Err(ApiFailure::new(
                FailureKind::Decode,
                "Response carried no data",
                Some(status),
            )),
            ApiResult::Failure(failure) => Err(failure),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, ApiFailure> {
        match self {
            ApiResult::Success { data, .. } => Ok(data),
            ApiResult::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success {
                message,
                data,
                status,
            } => ApiResult::Success {
                message,
                data: data.map(f),
                status,
            },
            ApiResult::Failure(failure) => ApiResult::Failure(failure),
        }
    }
}

/// Response envelope every back-office endpoint uses
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Server message, ignoring blanks
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// First non-blank candidate, or the default
pub(crate) fn pick_message<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    default: &'a str,
) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Status text in the form transport libraries usually report it
pub(crate) fn status_error_text(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let result: ApiResult<u32> = ApiResult::Success {
            message: "ok".to_string(),
            data: Some(7),
            status: 200,
        };
        assert!(result.is_success());
        assert_eq!(result.message(), "ok");
        assert_eq!(result.status_code(), Some(200));
        assert_eq!(result.data(), Some(&7));
        assert_eq!(result.map(|n| n * 2).into_data(), Some(14));
    }

    #[test]
    fn test_failure_accessors() {
        let result: ApiResult<u32> =
            ApiResult::failure(FailureKind::Unauthenticated, MISSING_TOKEN_MESSAGE, Some(401));
        assert!(!result.is_success());
        assert_eq!(result.status_code(), Some(401));
        assert!(result.failure_ref().unwrap().requires_login());
        assert!(result.data().is_none());

        let err = result.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid or missing access token (unauthenticated, status 401)"
        );
    }

    #[test]
    fn test_into_required_rejects_empty_payload() {
        let empty: ApiResult<u32> = ApiResult::Success {
            message: "ok".to_string(),
            data: None,
            status: 200,
        };
        assert_eq!(empty.into_required().unwrap_err().kind, FailureKind::Decode);
    }

    #[test]
    fn test_pick_message_skips_blanks() {
        assert_eq!(pick_message([None, Some("  "), Some("server")], "fallback"), "server");
        assert_eq!(pick_message([None, None], "fallback"), "fallback");
    }

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let envelope: Envelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert!(envelope.message().is_none());
        assert!(envelope.data.is_none());

        let envelope: Envelope =
            serde_json::from_str(r#"{"success":true,"message":"","data":{"a":1}}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.message().is_none());
        assert!(envelope.data.is_some());
    }
}
