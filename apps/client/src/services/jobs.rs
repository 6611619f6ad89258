use serde_json::Value;

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::ApiError;
use crate::models::Page;
use crate::payload::clean_empty_values;

/// Job postings: recruiter-side management plus the applicant-facing listings.
#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, job: Value) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::post("/jobs").json(clean_empty_values(job)))
            .await
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.client.send(ApiRequest::get("/jobs/").page(page)).await
    }

    pub async fn get(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/jobs/{job_id}")))
            .await
    }

    pub async fn update(&self, job_id: &str, job: Value) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::put(format!("/jobs/{job_id}")).json(clean_empty_values(job)))
            .await
    }

    pub async fn delete(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::delete(format!("/jobs/{job_id}")))
            .await
    }

    pub async fn list_by_recruiter(&self, recruiter_id: &str, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/jobs/recruiter/{recruiter_id}")).page(page))
            .await
    }

    pub async fn count_by_recruiter(&self, recruiter_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/jobs/recruiter/{recruiter_id}/count")))
            .await
    }

    /// Listing variant that includes each recruiter's company image.
    pub async fn list_with_images(&self, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get("/jobs/image/").page(page))
            .await
    }

    pub async fn search_with_images(&self, query: &str, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(
                ApiRequest::get("/jobs/search/image/")
                    .query("query", query)
                    .page(page),
            )
            .await
    }

    /// Number of jobs matching `query`; an empty query counts everything.
    pub async fn count(&self, query: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get("/jobs/image/count/").query("query", query))
            .await
    }
}
