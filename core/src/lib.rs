//! # picam Core
//!
//! Core library for picam - a terminal client for the Raspberry Pi camera
//! web service.
//!
//! This library provides the camera API client, the paginator for the
//! stored-picture table and the interaction controller that ties user
//! gestures to requests and view refreshes.

// Core modules
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod pagination;

// Re-export commonly used types
pub use api::{CameraApi, DownloadedFile, FileEntry, HttpCameraApi, PictureIndex, PictureQuery};
pub use config::ResolvedCameraConfig;
pub use controller::{Controller, ModalResponse, View};
pub use error::{Error, Result};
pub use pagination::{BoxMode, Pagination, Paginator, PaginatorConfig};

/// Current version of the picam-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
