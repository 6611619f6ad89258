//! Thin wrappers over the backend's resource endpoints.
//!
//! Every wrapper holds a clone of the shared [`ApiClient`], so all of them
//! ride on the same session and the same refresh behavior.

pub mod applications;
pub mod appliers;
pub mod auth;
pub mod jobs;
pub mod password_reset;
mod profiles;
pub mod recruiters;
pub mod view_logs;

pub use applications::ApplicationService;
pub use appliers::ApplierService;
pub use auth::AuthService;
pub use jobs::JobService;
pub use password_reset::PasswordResetService;
pub use recruiters::RecruiterService;
pub use view_logs::ViewLogService;

use crate::api_client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn jobs(&self) -> JobService {
        JobService::new(self.clone())
    }

    pub fn applications(&self) -> ApplicationService {
        ApplicationService::new(self.clone())
    }

    pub fn appliers(&self) -> ApplierService {
        ApplierService::new(self.clone())
    }

    pub fn recruiters(&self) -> RecruiterService {
        RecruiterService::new(self.clone())
    }

    pub fn password_reset(&self) -> PasswordResetService {
        PasswordResetService::new(self.clone())
    }

    pub fn view_logs(&self) -> ViewLogService {
        ViewLogService::new(self.clone())
    }
}
