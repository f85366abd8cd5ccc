//! Infrastructure adapters used by the features.
//!
//! Holds the local filesystem storage that report uploads are written to.

pub mod storage;
