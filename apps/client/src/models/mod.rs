pub mod pagination;
pub mod user;

pub use pagination::Page;
pub use user::{CurrentUser, UserType};
