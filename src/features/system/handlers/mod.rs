pub mod health_handler;

pub use health_handler::{__path_db_ping, __path_health_check, db_ping, health_check};
