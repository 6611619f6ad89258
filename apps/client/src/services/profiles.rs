use serde_json::Value;
use tracing::warn;

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::{ApiError, RegistrationError};
use crate::models::Page;
use crate::payload::clean_empty_values;

/// Endpoints that appliers and recruiters share under their own collection.
#[derive(Clone)]
pub(crate) struct ProfileEndpoints {
    client: ApiClient,
    collection: &'static str,
}

impl ProfileEndpoints {
    pub(crate) fn new(client: ApiClient, collection: &'static str) -> Self {
        Self { client, collection }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn member_path(&self, id: &str, action: &str) -> String {
        format!("/{}/{id}/{action}", self.collection)
    }

    pub(crate) async fn register(&self, account: Value) -> Result<Value, RegistrationError> {
        let request =
            ApiRequest::post(format!("/{}", self.collection)).json(clean_empty_values(account));
        self.client.send(request).await.map_err(|e| {
            warn!("Registration under /{} failed: {e}", self.collection);
            RegistrationError::from(e)
        })
    }

    pub(crate) async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/{}/", self.collection)).page(page))
            .await
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/{}/{id}", self.collection)))
            .await
    }

    pub(crate) async fn update(&self, id: &str, profile: Value) -> Result<Value, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/{}/{id}", self.collection))
                    .json(clean_empty_values(profile)),
            )
            .await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .send(ApiRequest::delete(format!("/{}/{id}", self.collection)))
            .await
    }

    /// Password payloads are sent as-is; blank fields are the backend's to reject.
    pub(crate) async fn change_password(&self, id: &str, passwords: Value) -> Result<(), ApiError> {
        self.client
            .send(ApiRequest::post(self.member_path(id, "change-password")).json(passwords))
            .await?;
        Ok(())
    }
}
