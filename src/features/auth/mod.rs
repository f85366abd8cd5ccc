//! Registration, login and signed session tokens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET/POST | `/register` | Registration page and form |
//! | GET/POST | `/login` | Login page and form (sets the session cookie) |
//! | GET | `/logout` | Clear the session cookie |
//! | POST | `/api/mobile-login` | JSON login, returns a bearer token |
//! | POST | `/api/mobile-register` | JSON registration |
//! | GET | `/check-admin-status` | Re-read the admin flag |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
