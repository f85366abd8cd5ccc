//! Storage module for uploaded report images

mod local_storage;

pub use local_storage::{is_image_content_type, LocalStorage};
