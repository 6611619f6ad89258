//! Client for the job-board backend.
//!
//! [`ApiClient`] owns the session: it attaches the bearer token, renews the
//! session once when a call comes back 401, and hands control to a
//! [`LoginRedirect`] when the session cannot be saved. The resource services
//! in [`services`] are thin wrappers on top of it.

pub mod api_client;
pub mod config;
pub mod errors;
pub mod models;
pub mod payload;
pub mod redirect;
pub mod services;
pub mod session;

pub use api_client::{ApiClient, ApiClientBuilder, ApiRequest, RefreshStrategy};
pub use config::Config;
pub use errors::{ApiError, RefreshFailure, RegistrationError};
pub use redirect::{LogRedirect, LoginRedirect};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, TokenGrant};
