use serde_json::Value;

use super::profiles::ProfileEndpoints;
use crate::api_client::ApiClient;
use crate::errors::{ApiError, RegistrationError};
use crate::models::Page;

/// Recruiter accounts and company profiles.
#[derive(Clone)]
pub struct RecruiterService {
    endpoints: ProfileEndpoints,
}

impl RecruiterService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoints: ProfileEndpoints::new(client, "recruiters"),
        }
    }

    pub async fn register(&self, account: Value) -> Result<Value, RegistrationError> {
        self.endpoints.register(account).await
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.endpoints.list(page).await
    }

    pub async fn get(&self, recruiter_id: &str) -> Result<Value, ApiError> {
        self.endpoints.get(recruiter_id).await
    }

    pub async fn update_profile(&self, recruiter_id: &str, profile: Value) -> Result<Value, ApiError> {
        self.endpoints.update(recruiter_id, profile).await
    }

    pub async fn delete(&self, recruiter_id: &str) -> Result<Value, ApiError> {
        self.endpoints.delete(recruiter_id).await
    }

    pub async fn change_password(&self, recruiter_id: &str, passwords: Value) -> Result<(), ApiError> {
        self.endpoints.change_password(recruiter_id, passwords).await
    }
}
