use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::session::StoreError;

/// Error returned by every call that goes through [`crate::api_client::ApiClient`].
///
/// Non-2xx responses are carried verbatim in [`ApiError::Http`] so callers can
/// interpret backend-specific status codes themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// The `detail` member of a FastAPI error body, if the body is JSON and has one.
    pub fn detail(&self) -> Option<Value> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|mut v| v.get_mut("detail").map(Value::take)),
            _ => None,
        }
    }
}

/// Why a silent session refresh could not be completed.
///
/// Cloneable because a single refresh outcome is handed to every request
/// waiting on the same in-flight refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshFailure {
    #[error("no refresh token in the session store")]
    MissingRefreshToken,

    #[error("refresh rejected with status {status}")]
    Rejected { status: u16 },

    #[error("refresh request failed: {0}")]
    Network(String),

    #[error("refresh response could not be decoded: {0}")]
    Decode(String),

    #[error("session store failed during refresh: {0}")]
    Store(String),
}

impl From<StoreError> for RefreshFailure {
    fn from(e: StoreError) -> Self {
        RefreshFailure::Store(e.to_string())
    }
}

/// Classified failure of an applier or recruiter sign-up.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Something went wrong, maybe try changing your username or email")]
    BadRequest { details: Option<Value> },

    #[error("Please fix the following errors:")]
    Validation { details: Value },

    #[error("{message}")]
    Other { status: StatusCode, message: String },

    #[error("{message}")]
    Unexpected { message: String },
}

impl RegistrationError {
    /// Machine-readable kind, matching the codes the portal UI switches on.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::BadRequest { .. } => "BAD_REQUEST",
            RegistrationError::Validation { .. } => "VALIDATION_ERROR",
            RegistrationError::Other { .. } => "OTHER_ERROR",
            RegistrationError::Unexpected { .. } => "UNEXPECTED_ERROR",
        }
    }
}

impl From<ApiError> for RegistrationError {
    fn from(err: ApiError) -> Self {
        let ApiError::Http { status, body } = &err else {
            return RegistrationError::Unexpected {
                message: err.to_string(),
            };
        };
        let detail = err.detail();

        match status.as_u16() {
            400 => RegistrationError::BadRequest { details: detail },
            422 => RegistrationError::Validation {
                details: detail
                    .or_else(|| serde_json::from_str(body).ok())
                    .unwrap_or(Value::Null),
            },
            _ => RegistrationError::Other {
                status: *status,
                message: match detail {
                    Some(Value::String(s)) => s,
                    Some(other) => other.to_string(),
                    None => format!("Registration failed with status: {}", status.as_u16()),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(status: u16, body: &str) -> ApiError {
        ApiError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_is_unauthorized_only_for_401() {
        assert!(http(401, "").is_unauthorized());
        assert!(!http(403, "").is_unauthorized());
        assert!(!ApiError::Validation("x".into()).is_unauthorized());
    }

    #[test]
    fn test_detail_extracts_fastapi_field() {
        let err = http(400, r#"{"detail":"Invalid or expired OTP"}"#);
        assert_eq!(err.detail(), Some(json!("Invalid or expired OTP")));
        assert_eq!(http(500, "oops").detail(), None);
    }

    #[test]
    fn test_registration_400_is_bad_request() {
        let err = RegistrationError::from(http(400, r#"{"detail":"Email already registered"}"#));
        assert_eq!(err.kind(), "BAD_REQUEST");
        assert_eq!(
            err.to_string(),
            "Something went wrong, maybe try changing your username or email"
        );
        match err {
            RegistrationError::BadRequest { details } => {
                assert_eq!(details, Some(json!("Email already registered")))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_registration_422_keeps_whole_body_without_detail() {
        let err = RegistrationError::from(http(422, r#"{"errors":["name"]}"#));
        match err {
            RegistrationError::Validation { details } => {
                assert_eq!(details, json!({"errors": ["name"]}))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_registration_other_status_message() {
        let err = RegistrationError::from(http(409, ""));
        assert_eq!(err.kind(), "OTHER_ERROR");
        assert_eq!(err.to_string(), "Registration failed with status: 409");
    }

    #[test]
    fn test_registration_non_http_is_unexpected() {
        let err = RegistrationError::from(ApiError::Configuration("bad url".into()));
        assert_eq!(err.kind(), "UNEXPECTED_ERROR");
    }
}
