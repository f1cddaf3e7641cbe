//! Interaction controller
//!
//! Turns user gestures into camera requests and refreshes the file table
//! afterwards. Every operation returns an explicit result; a refresh
//! re-fetches the listing instead of rebuilding all client state.

pub mod pending;
pub mod view;

pub use pending::PendingDelete;
pub use view::{ModalResponse, NullView, View, DELETE_ALL_MODAL, DELETE_MODAL};

use crate::api::{CameraApi, DeleteIndex, FileEntry, PictureIndex, PictureQuery};
use crate::error::Result;
use crate::pagination::{Pagination, Paginator};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Wires gestures to the camera API and the view
pub struct Controller {
    api: Box<dyn CameraApi>,
    view: Box<dyn View>,
    paginator: Paginator,
    pending: PendingDelete,
    pagination: Option<Pagination>,
}

impl Controller {
    /// Create a new controller
    pub fn new(api: Box<dyn CameraApi>, view: Box<dyn View>, paginator: Paginator) -> Self {
        Self {
            api,
            view,
            paginator,
            pending: PendingDelete::new(),
            pagination: None,
        }
    }

    /// Current pagination, once the table has been set up
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn pending_delete(&self) -> Option<u32> {
        self.pending.get()
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// Initial load: fetch the listing, paginate from the first page and render
    pub async fn setup(&mut self) -> Result<&Pagination> {
        self.load_table(0).await
    }

    /// Initial load starting on a zero-based `page`, clamped to the last page
    pub async fn setup_on_page(&mut self, page: usize) -> Result<&Pagination> {
        self.load_table(page).await
    }

    /// Re-fetch the listing, staying on the current page when it still exists
    pub async fn refresh(&mut self) -> Result<&Pagination> {
        let page = self.pagination.as_ref().map_or(0, Pagination::active_page);
        self.load_table(page).await
    }

    async fn load_table(&mut self, page: usize) -> Result<&Pagination> {
        let mut rows = self.api.list_files().await?;
        // Most recent picture first
        rows.sort_by(|a, b| b.index.cmp(&a.index));
        debug!("Loaded {} file rows", rows.len());

        let pagination = self.paginator.paginate(rows, page);
        self.view.render(&pagination).await?;
        Ok(&*self.pagination.insert(pagination))
    }

    /// Capture a picture, download it and refresh the table
    ///
    /// Once the capture is accepted the table is refreshed even when the
    /// download or the local save fails, since the camera now holds a new
    /// picture.
    pub async fn capture_and_download(&mut self) -> Result<PathBuf> {
        info!("Capturing picture");
        let path = match self.api.capture().await {
            Ok(()) => {
                let saved = self.save_latest().await;
                self.refresh_then(saved).await?
            }
            Err(e) => self.refresh_after(Err(e)).await?,
        };
        info!("Saved capture to {}", path.display());
        Ok(path)
    }

    async fn save_latest(&self) -> Result<PathBuf> {
        let file = self.api.fetch_picture(PictureQuery::latest_download()).await?;
        self.view.save_download(&file).await
    }

    /// Fetch one stored picture and save it through the view
    pub async fn fetch_picture(&self, index: PictureIndex, download: bool) -> Result<PathBuf> {
        let file = self
            .api
            .fetch_picture(PictureQuery::new(index, download))
            .await?;
        debug!("Fetched {} ({} bytes)", file.name, file.len());
        self.view.save_download(&file).await
    }

    /// Fetch the zip of every picture and save it through the view
    pub async fn download_all(&self) -> Result<PathBuf> {
        let archive = self.api.download_all().await?;
        info!("Downloaded archive {} ({} bytes)", archive.name, archive.len());
        self.view.save_download(&archive).await
    }

    /// Display a modal; pure delegation to the view
    pub async fn open_modal(&self, id: &str) -> Result<ModalResponse> {
        self.view.show_modal(id).await
    }

    /// Stage `index` for deletion and open the confirmation modal
    pub async fn prepare_delete(&mut self, index: u32) -> Result<ModalResponse> {
        self.pending.set(index);
        debug!("Staged picture {} for deletion", index);
        self.open_modal(DELETE_MODAL).await
    }

    pub fn cancel_delete(&mut self) {
        if let Some(index) = self.pending.take() {
            debug!("Unstaged picture {}", index);
        }
    }

    /// Delete the staged picture and refresh
    ///
    /// With nothing staged the request still goes out carrying the
    /// non-numeric sentinel and the server decides.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let index = DeleteIndex::from(self.pending.take());
        if index == DeleteIndex::Unset {
            warn!("Confirming delete with no picture staged");
        }
        info!("Deleting picture {}", index);
        let outcome = self.api.delete(index).await;
        self.refresh_after(outcome).await
    }

    /// Delete every picture and refresh
    pub async fn delete_all(&mut self) -> Result<()> {
        info!("Deleting all pictures");
        let outcome = self.api.delete_all().await;
        self.refresh_after(outcome).await
    }

    /// Show another page of the current table without touching the network
    pub async fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.change_page(|pagination| pagination.set_active_page(page))
            .await
    }

    pub async fn next_page(&mut self) -> Result<()> {
        self.change_page(Pagination::next_page).await
    }

    pub async fn previous_page(&mut self) -> Result<()> {
        self.change_page(Pagination::previous_page).await
    }

    async fn change_page<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Pagination),
    {
        let Some(pagination) = self.pagination.as_mut() else {
            self.setup().await?;
            return Ok(());
        };
        change(pagination);
        self.view.render(pagination).await
    }

    /// Surface a failed gesture through the view's error banner
    pub fn report_error(&self, error: &dyn std::fmt::Display) {
        let message = error.to_string();
        warn!("{}", message);
        self.view.show_error(&message);
    }

    /// Row shown at `position` in the table (0 = most recent)
    pub fn row_at(&self, position: usize) -> Option<&FileEntry> {
        self.pagination.as_ref()?.rows().get(position)
    }

    /// Refresh after a mutating request that reached the server, then report
    /// the request's own outcome. Transport failures skip the refresh.
    async fn refresh_after<T>(&mut self, outcome: Result<T>) -> Result<T> {
        let transport_failure = matches!(&outcome, Err(e) if !e.is_server_rejection());
        if transport_failure {
            return outcome;
        }
        self.refresh_then(outcome).await
    }

    /// Refresh unconditionally, then report `outcome`. A refresh failure only
    /// replaces a successful outcome.
    async fn refresh_then<T>(&mut self, outcome: Result<T>) -> Result<T> {
        match self.refresh().await {
            Ok(_) => outcome,
            Err(refresh_err) => match outcome {
                Ok(_) => Err(refresh_err),
                Err(e) => {
                    warn!("Refresh after failed request also failed: {}", refresh_err);
                    Err(e)
                }
            },
        }
    }
}
