mod profile_service;
mod user_service;

pub use profile_service::{EmailChange, ProfileService};
pub use user_service::{like_pattern, UserService};
