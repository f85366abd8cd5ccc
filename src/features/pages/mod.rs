//! Server-rendered HTML pages.
//!
//! Pages that belong to a feature (`/login`, `/profile`, `/precautions`, `/raporlar`) are
//! routed by that feature; this module routes the rest.

pub mod handlers;
pub mod routes;
