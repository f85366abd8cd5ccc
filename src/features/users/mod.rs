//! User accounts and self-service profile management.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/profile` | Profile page |
//! | POST | `/update-profile` | Profile form (email + password) |
//! | POST | `/api/profile/email` | Change email |
//! | POST | `/api/profile/password` | Change password |
//! | GET | `/api/users/search` | Name search for the witness picker |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ProfileService, UserService};
