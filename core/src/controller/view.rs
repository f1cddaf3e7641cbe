//! View abstraction the controller renders through
//!
//! The controller never prints or writes files itself. A view shows modals,
//! renders the paginated table and saves downloads; the CLI provides a
//! terminal implementation and tests use a recording one.

use crate::api::DownloadedFile;
use crate::error::Result;
use crate::pagination::Pagination;
use async_trait::async_trait;
use std::path::PathBuf;

/// Modal asking to confirm deletion of the staged row
pub const DELETE_MODAL: &str = "deleteModal";

/// Modal asking to confirm deletion of every picture
pub const DELETE_ALL_MODAL: &str = "deleteAllModal";

/// How the user left a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResponse {
    Confirmed,
    Dismissed,
}

impl ModalResponse {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ModalResponse::Confirmed)
    }
}

/// Rendering surface for the controller
#[async_trait]
pub trait View: Send + Sync {
    /// Display the modal with the given id
    async fn show_modal(&self, id: &str) -> Result<ModalResponse>;

    /// Render the paginated file table and its control box
    async fn render(&self, pagination: &Pagination) -> Result<()>;

    /// Persist a downloaded file, returning where it landed
    async fn save_download(&self, file: &DownloadedFile) -> Result<PathBuf>;

    /// Error banner for a failed gesture
    fn show_error(&self, _message: &str) {}
}

/// View that renders nothing and saves nothing
pub struct NullView;

#[async_trait]
impl View for NullView {
    async fn show_modal(&self, _id: &str) -> Result<ModalResponse> {
        Ok(ModalResponse::Dismissed)
    }

    async fn render(&self, _pagination: &Pagination) -> Result<()> {
        Ok(())
    }

    async fn save_download(&self, file: &DownloadedFile) -> Result<PathBuf> {
        Ok(PathBuf::from(&file.name))
    }
}
