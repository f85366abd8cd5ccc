mod auth_service;
pub mod password;
mod token_service;

pub use auth_service::{normalize_email, AuthService, Session};
pub use password::hash_password_blocking;
pub use token_service::TokenService;
