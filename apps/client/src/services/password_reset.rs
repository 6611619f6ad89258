//! Three-step password reset: request an OTP by email, verify it, set a new password.

use serde::Serialize;
use serde_json::Value;

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::ApiError;

pub const OTP_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

#[derive(Clone)]
pub struct PasswordResetService {
    client: ApiClient,
}

impl PasswordResetService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The backend answers the same way whether or not the address is registered.
    pub async fn request_reset(&self, email: &str) -> Result<Value, ApiError> {
        validate_email(email)?;
        self.client
            .send(ApiRequest::post("/auth/forgot-password").json(serde_json::json!({ "email": email })))
            .await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<Value, ApiError> {
        validate_email(email)?;
        validate_otp(otp)?;
        let body = serde_json::to_value(OtpRequest { email, otp })?;
        self.client
            .send(ApiRequest::post("/auth/verify-otp").json(body))
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<Value, ApiError> {
        validate_email(email)?;
        validate_otp(otp)?;
        validate_password(new_password)?;
        let body = serde_json::to_value(ResetRequest {
            email,
            otp,
            new_password,
        })?;
        self.client
            .send(ApiRequest::post("/auth/reset-password").json(body))
            .await
    }
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("'{email}' is not an email address")))
    }
}

fn validate_otp(otp: &str) -> Result<(), ApiError> {
    if otp.chars().count() == OTP_LENGTH {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "OTP must be {OTP_LENGTH} characters"
        )))
    }
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )))
    }
}
