//! Liveness and database reachability checks.

pub mod handlers;
pub mod routes;
