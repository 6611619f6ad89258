//! Authenticated API client. Every backend call in the crate goes through here.
//!
//! Attaches the stored access token as a bearer credential. On a 401 the
//! client spends exactly one refresh on the call: it exchanges the refresh
//! token at `/auth/refresh`, stores the new session and replays the request.
//! If the refresh cannot be done the session is cleared, the login redirect
//! fires, and the caller gets the original 401 back.
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use futures::FutureExt;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::{ApiError, RefreshFailure};
use crate::redirect::{LogRedirect, LoginRedirect};
use crate::session::{Session, SessionStore, TokenGrant, DEFAULT_REFRESH_TOKEN_TTL_DAYS};

mod flight;
mod request;

use flight::RefreshFlight;
pub use request::ApiRequest;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const REFRESH_PATH: &str = "/auth/refresh";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How concurrent 401s coordinate their refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshStrategy {
    /// One refresh at a time; concurrent callers await the same outcome.
    #[default]
    SingleFlight,
    /// Every 401 refreshes on its own. With a backend that rotates refresh
    /// tokens, all but one of a concurrent burst will fail and log the user out.
    PerRequest,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

struct Inner {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
    strategy: RefreshStrategy,
    refresh_ttl: Duration,
    flight: RefreshFlight,
}

/// Cheap to clone; clones share the session store and the refresh slot.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

pub struct ApiClientBuilder {
    base_url: String,
    store: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
    strategy: RefreshStrategy,
    refresh_ttl: Duration,
    timeout: StdDuration,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn on_login_required(mut self, redirect: impl LoginRedirect + 'static) -> Self {
        self.redirect = Arc::new(redirect);
        self
    }

    pub fn refresh_strategy(mut self, strategy: RefreshStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Configuration(format!("invalid base URL '{base_url}': {e}")))?;

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                store: self.store,
                redirect: self.redirect,
                strategy: self.strategy,
                refresh_ttl: self.refresh_ttl,
                flight: RefreshFlight::default(),
            }),
        })
    }
}

impl ApiClient {
    pub fn builder(store: Arc<dyn SessionStore>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: DEFAULT_API_URL.to_string(),
            store,
            redirect: Arc::new(LogRedirect::default()),
            strategy: RefreshStrategy::default(),
            refresh_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
            timeout: StdDuration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let refresh_ttl = Duration::try_days(config.refresh_token_ttl_days).ok_or_else(|| {
            ApiError::Configuration(format!(
                "refresh token TTL of {} days is out of range",
                config.refresh_token_ttl_days
            ))
        })?;
        ApiClient::builder(store)
            .base_url(config.api_url.clone())
            .on_login_required(LogRedirect::new(config.login_route.clone()))
            .refresh_token_ttl(refresh_ttl)
            .timeout(StdDuration::from_secs(config.request_timeout_secs))
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    /// The stored access token, if it has not expired.
    pub async fn access_token(&self) -> Result<Option<String>, ApiError> {
        let now = Utc::now();
        Ok(self
            .inner
            .store
            .get()
            .await?
            .and_then(|s| s.access_token_at(now).map(str::to_owned)))
    }

    /// Stores a freshly issued token pair as the current session.
    pub async fn establish_session(&self, grant: TokenGrant) -> Result<Session, ApiError> {
        let session = Session::from_grant(grant, Utc::now(), self.inner.refresh_ttl);
        self.inner.store.set(&session).await?;
        Ok(session)
    }

    pub async fn end_session(&self) -> Result<(), ApiError> {
        self.inner.store.clear().await?;
        Ok(())
    }

    /// Sends `request`, refreshing the session and replaying once on a 401.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Value, ApiError> {
        let token = self.access_token().await?;

        let err = match self.dispatch(&request, token.as_deref()).await {
            Ok(body) => return Ok(body),
            Err(err) => err,
        };
        if !err.is_unauthorized() || request.retried {
            return Err(err);
        }
        request.retried = true;

        match self.renew_access_token(token.as_deref()).await {
            Ok(fresh) => {
                debug!("Replaying {} {} with renewed session", request.method, request.path);
                self.dispatch(&request, Some(&fresh)).await
            }
            Err(failure) => {
                debug!(
                    "{} {} unauthorized and session could not be renewed: {failure}",
                    request.method, request.path
                );
                Err(err)
            }
        }
    }

    /// Sends `request` and deserializes the response body.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.send(request).await?)?)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, ApiError> {
        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {} -> {}", request.method, request.path, status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Produces an access token to replay with, refreshing if needed.
    /// `stale` is the token the failed request was sent with.
    async fn renew_access_token(&self, stale: Option<&str>) -> Result<String, RefreshFailure> {
        let session = match self.inner.strategy {
            RefreshStrategy::PerRequest => self.refresh_session().await?,
            RefreshStrategy::SingleFlight => {
                let stored = self.inner.store.get().await?;
                let Some(stored) = stored else {
                    if stale.is_some() {
                        // Torn down by a concurrent failed refresh, which has
                        // already redirected.
                        return Err(RefreshFailure::MissingRefreshToken);
                    }
                    return self.refresh_session().await.map(|s| s.access_token);
                };
                if let Some(current) = renewed_token(&stored, stale) {
                    debug!("Session already renewed by a concurrent request");
                    return Ok(current.to_owned());
                }

                let client = self.clone();
                let stale = stale.map(str::to_owned);
                self.inner
                    .flight
                    .run(move || {
                        async move { client.refresh_unless_renewed(stale.as_deref()).await }.boxed()
                    })
                    .await?
            }
        };
        Ok(session.access_token)
    }

    /// Runs inside the flight. A previous flight may have rotated the tokens
    /// after the caller last read the store, so the store is checked again.
    async fn refresh_unless_renewed(&self, stale: Option<&str>) -> Result<Session, RefreshFailure> {
        match self.inner.store.get().await? {
            Some(stored) if renewed_token(&stored, stale).is_some() => {
                debug!("Session renewed by an earlier refresh; skipping exchange");
                Ok(stored)
            }
            None if stale.is_some() => Err(RefreshFailure::MissingRefreshToken),
            _ => self.refresh_session().await,
        }
    }

    /// Refreshes the session, or tears it down if that is impossible.
    async fn refresh_session(&self) -> Result<Session, RefreshFailure> {
        match self.exchange_refresh_token().await {
            Ok(session) => {
                info!("Session renewed; access token valid until {}", session.expires_at);
                Ok(session)
            }
            Err(failure) => {
                warn!("Session refresh failed: {failure}");
                if let Err(e) = self.inner.store.clear().await {
                    error!("Failed to clear session store: {e}");
                }
                self.inner.redirect.redirect_to_login();
                Err(failure)
            }
        }
    }

    async fn exchange_refresh_token(&self) -> Result<Session, RefreshFailure> {
        let now = Utc::now();
        let refresh_token = self
            .inner
            .store
            .get()
            .await?
            .and_then(|s| s.refresh_token_at(now).map(str::to_owned))
            .ok_or(RefreshFailure::MissingRefreshToken)?;

        let response = self
            .inner
            .http
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await
            .map_err(|e| RefreshFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshFailure::Rejected {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RefreshFailure::Network(e.to_string()))?;
        let grant: TokenGrant =
            serde_json::from_slice(&bytes).map_err(|e| RefreshFailure::Decode(e.to_string()))?;

        let session = Session::from_grant(grant, Utc::now(), self.inner.refresh_ttl);
        self.inner.store.set(&session).await?;
        Ok(session)
    }
}

/// The stored access token, if it is live and not the one that was rejected.
fn renewed_token<'a>(stored: &'a Session, stale: Option<&str>) -> Option<&'a str> {
    stored
        .access_token_at(Utc::now())
        .filter(|current| Some(*current) != stale)
}
