use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Applier,
    Recruiter,
}

/// Profile returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl CurrentUser {
    pub fn is_recruiter(&self) -> bool {
        self.user_type == UserType::Recruiter
    }

    pub fn is_applier(&self) -> bool {
        self.user_type == UserType::Applier
    }
}
