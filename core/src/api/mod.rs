//! Camera web service client

pub mod client;
pub mod endpoint;
pub mod http;

pub use client::{CameraApi, DownloadedFile, FileEntry};
pub use endpoint::{DeleteIndex, Endpoint, PictureIndex, PictureQuery, UNSET_INDEX_SENTINEL};
pub use http::HttpCameraApi;
