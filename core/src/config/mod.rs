//! Minimal configuration module for picam core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{ResolvedCameraConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
