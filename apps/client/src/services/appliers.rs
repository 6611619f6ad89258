use serde_json::Value;

use super::profiles::ProfileEndpoints;
use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::{ApiError, RegistrationError};
use crate::models::Page;
use crate::payload::clean_empty_values;

/// Applicant accounts, profiles and stored resume data.
#[derive(Clone)]
pub struct ApplierService {
    endpoints: ProfileEndpoints,
}

impl ApplierService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            endpoints: ProfileEndpoints::new(client, "appliers"),
        }
    }

    pub async fn register(&self, account: Value) -> Result<Value, RegistrationError> {
        self.endpoints.register(account).await
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.endpoints.list(page).await
    }

    pub async fn get(&self, applier_id: &str) -> Result<Value, ApiError> {
        self.endpoints.get(applier_id).await
    }

    pub async fn update_profile(&self, applier_id: &str, profile: Value) -> Result<Value, ApiError> {
        self.endpoints.update(applier_id, profile).await
    }

    pub async fn delete(&self, applier_id: &str) -> Result<Value, ApiError> {
        self.endpoints.delete(applier_id).await
    }

    pub async fn change_password(&self, applier_id: &str, passwords: Value) -> Result<(), ApiError> {
        self.endpoints.change_password(applier_id, passwords).await
    }

    /// Merges parsed resume sections into the applier's profile.
    pub async fn update_resume(&self, applier_id: &str, resume: Value) -> Result<Value, ApiError> {
        let path = self.endpoints.member_path(applier_id, "update-resume");
        self.endpoints
            .client()
            .send(ApiRequest::put(path).json(clean_empty_values(resume)))
            .await
    }

    pub async fn delete_resume_components(
        &self,
        applier_id: &str,
        components: Value,
    ) -> Result<Value, ApiError> {
        let path = self.endpoints.member_path(applier_id, "delete-resume-components");
        self.endpoints
            .client()
            .send(ApiRequest::put(path).json(clean_empty_values(components)))
            .await
    }

    pub async fn clear_profile_picture(&self, applier_id: &str) -> Result<Value, ApiError> {
        let path = self.endpoints.member_path(applier_id, "clear-profile-picture");
        self.endpoints.client().send(ApiRequest::put(path)).await
    }
}
