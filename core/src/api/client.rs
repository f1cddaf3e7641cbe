//! Camera API trait and response structures

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::endpoint::{DeleteIndex, PictureIndex, PictureQuery};

/// Trait for camera service clients
#[async_trait]
pub trait CameraApi: Send + Sync {
    /// Trigger a capture on the camera
    async fn capture(&self) -> Result<()>;

    /// Fetch a stored picture
    async fn fetch_picture(&self, query: PictureQuery) -> Result<DownloadedFile>;

    /// Delete one stored picture
    async fn delete(&self, index: DeleteIndex) -> Result<()>;

    /// Delete every stored picture
    async fn delete_all(&self) -> Result<()>;

    /// List stored pictures, in the order the server reports them
    async fn list_files(&self) -> Result<Vec<FileEntry>>;

    /// Fetch a zip archive of every stored picture
    async fn download_all(&self) -> Result<DownloadedFile>;

    /// Base URL of the camera service
    fn base_url(&self) -> &str;
}

/// One stored picture as listed by the camera
///
/// The server encodes each entry as a two element array `[index, name]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, String)", into = "(u32, String)")]
pub struct FileEntry {
    pub index: u32,
    pub name: String,
}

impl FileEntry {
    pub fn new<S: Into<String>>(index: u32, name: S) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// URI that opens this picture in the browser
    pub fn picture_uri(&self) -> String {
        format!("/picture?index={}", self.index)
    }
}

impl From<(u32, String)> for FileEntry {
    fn from((index, name): (u32, String)) -> Self {
        Self { index, name }
    }
}

impl From<FileEntry> for (u32, String) {
    fn from(entry: FileEntry) -> Self {
        (entry.index, entry.name)
    }
}

/// A file body returned by the camera, ready to be saved
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// File name to save under
    pub name: String,
    /// Raw body
    pub bytes: Bytes,
    /// Content type reported by the server
    pub content_type: Option<String>,
}

impl DownloadedFile {
    pub fn new<S: Into<String>>(name: S, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Name a picture is saved under when the server sends no `Content-Disposition`
pub fn fallback_picture_name(index: PictureIndex) -> String {
    match index {
        PictureIndex::At(index) => format!("picam_{:04}.jpg", index),
        PictureIndex::Latest => format!(
            "picam_latest_{}.jpg",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ),
    }
}

/// Extract the file name from a `Content-Disposition` header value
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .filter_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .find(|name| is_plain_file_name(name))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_from_wire_pairs() {
        let entries: Vec<FileEntry> =
            serde_json::from_str(r#"[[1, "Picamip_0001.jpg"], [2, "Picamip_0002.jpg"]]"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], FileEntry::new(2, "Picamip_0002.jpg"));
        assert_eq!(entries[0].picture_uri(), "/picture?index=1");
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=Picamip_0003.jpg"),
            Some("Picamip_0003.jpg".to_string())
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="Picamip_.zip""#),
            Some("Picamip_.zip".to_string())
        );
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition("attachment; filename=../etc/passwd"), None);
    }

    #[test]
    fn test_fallback_picture_name() {
        assert_eq!(fallback_picture_name(PictureIndex::At(12)), "picam_0012.jpg");
        let latest = fallback_picture_name(PictureIndex::Latest);
        assert!(latest.starts_with("picam_latest_"));
        assert!(latest.ends_with(".jpg"));
    }
}
