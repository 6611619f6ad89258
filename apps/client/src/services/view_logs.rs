use serde_json::Value;

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::ApiError;
use crate::payload::clean_empty_values;

/// Job view tracking.
#[derive(Clone)]
pub struct ViewLogService {
    client: ApiClient,
}

impl ViewLogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn record(&self, view: Value) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::post("/log-views/").json(clean_empty_values(view)))
            .await
    }

    pub async fn count_for_job(&self, job_id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/log-views/job/{job_id}/count")))
            .await
    }
}
