//! Session tokens and the stores that persist them between calls.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Lifetime the client assigns to a refresh token when it is stored.
/// The backend never reports this value, so it is a local best guess.
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Longest lifetime recorded for either token. Larger backend values are
/// clamped so the expiry stays a representable, serializable date.
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 3650;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Token pair issued by `/auth/login` and `/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// The authenticated session held by the client.
///
/// Each token carries its own expiry; a token past its expiry reads as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl Session {
    /// `expires_in` and `refresh_ttl` are clamped to
    /// `0..=MAX_TOKEN_LIFETIME_DAYS`.
    pub fn from_grant(grant: TokenGrant, issued_at: DateTime<Utc>, refresh_ttl: Duration) -> Self {
        let max_secs = MAX_TOKEN_LIFETIME_DAYS * 24 * 60 * 60;
        let access_ttl = Duration::seconds(grant.expires_in.clamp(0, max_secs));
        let refresh_ttl = refresh_ttl.clamp(Duration::zero(), Duration::seconds(max_secs));
        Session {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: expiry(issued_at, access_ttl),
            refresh_expires_at: expiry(issued_at, refresh_ttl),
        }
    }

    pub fn access_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        (now < self.expires_at).then_some(self.access_token.as_str())
    }

    pub fn refresh_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        (now < self.refresh_expires_at).then_some(self.refresh_token.as_str())
    }
}

fn expiry(issued_at: DateTime<Utc>, lifetime: Duration) -> DateTime<Utc> {
    issued_at
        .checked_add_signed(lifetime)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Persistence for the current [`Session`].
///
/// Implementations must tolerate concurrent callers; the client never holds
/// a lock across calls.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<Session>, StoreError>;

    /// Replaces any stored session.
    async fn set(&self, session: &Session) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}
