use serde::Serialize;
use tracing::{debug, info};

use crate::api_client::{ApiClient, ApiRequest};
use crate::errors::ApiError;
use crate::models::CurrentUser;
use crate::session::{Session, TokenGrant};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

/// Login, logout and the current-user lookup.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST /auth/login
    ///
    /// `identifier` is a username or an email address.
    /// Wrong credentials come back as a plain 401; login never triggers a
    /// session refresh.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::to_value(LoginRequest {
            identifier,
            password,
        })?;
        let grant: TokenGrant = self
            .client
            .send_as(ApiRequest::post("/auth/login").json(body).mark_retried())
            .await?;

        let session = self.client.establish_session(grant).await?;
        info!("Signed in as {identifier}");
        Ok(session)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.end_session().await?;
        info!("Signed out");
        Ok(())
    }

    /// GET /auth/me
    ///
    /// Returns `None` when there is no usable session.
    pub async fn current_user(&self) -> Option<CurrentUser> {
        match self.client.send_as(ApiRequest::get("/auth/me")).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Current user unavailable: {e}");
                None
            }
        }
    }

    /// True while the store holds an unexpired access token.
    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.client.access_token().await?.is_some())
    }
}
