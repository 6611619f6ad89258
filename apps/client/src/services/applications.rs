use serde_json::Value;

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::ApiError;
use crate::models::Page;
use crate::payload::clean_empty_values;

#[derive(Clone)]
pub struct ApplicationService {
    client: ApiClient,
}

impl ApplicationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, application: Value) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::post("/applications/").json(clean_empty_values(application)))
            .await
    }

    pub async fn get(&self, application_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/applications/{application_id}")))
            .await
    }

    /// How many applications an applier has submitted.
    pub async fn count_for_applier(&self, applier_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/applications/applier/{applier_id}/count")))
            .await
    }

    /// How many applications a job has received.
    pub async fn count_for_job(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/applications/job/{job_id}/count")))
            .await
    }

    pub async fn history(&self, applier_id: &str, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/applications/history/{applier_id}")).page(page))
            .await
    }

    pub async fn appliers_for_job(&self, job_id: &str, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/applications/job/{job_id}/appliers")).page(page))
            .await
    }
}
