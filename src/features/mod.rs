pub mod auth;
pub mod categories;
pub mod pages;
pub mod precautions;
pub mod reports;
pub mod system;
pub mod users;
