//! Safety precautions curated by admins and shown to everyone.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PrecautionService;
