//! CLI command implementations

pub mod capture;
pub mod delete;
pub mod download;
pub mod list;
pub mod shell;

pub use capture::capture_command;
pub use delete::{delete_all_command, delete_command};
pub use download::{download_all_command, get_command};
pub use list::list_command;
pub use shell::shell_command;

use crate::output::{TerminalView, TerminalViewConfig};
use anyhow::{Context, Result};
use picam_core::pagination::{Paginator, PaginatorConfig};
use picam_core::{Controller, HttpCameraApi, ResolvedCameraConfig};
use tracing::debug;

/// Options shared by every command
pub struct CommandContext {
    pub config: ResolvedCameraConfig,
    /// Skip confirmation prompts
    pub assume_yes: bool,
}

impl CommandContext {
    pub fn new(config: ResolvedCameraConfig) -> Self {
        Self {
            config,
            assume_yes: false,
        }
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub(crate) fn view_config(&self) -> TerminalViewConfig {
        let mut view_config = TerminalViewConfig::new(self.config.download_dir.clone());
        view_config.assume_yes = self.assume_yes;
        view_config
    }

    /// Controller over HTTP rendering to the terminal
    pub fn controller(&self) -> Result<Controller> {
        self.controller_with_view(self.view_config())
    }

    pub(crate) fn controller_with_view(&self, view_config: TerminalViewConfig) -> Result<Controller> {
        let api = HttpCameraApi::new(&self.config).with_context(|| {
            format!("Failed to create camera client for {}", self.config.base_url)
        })?;
        debug!("Using camera at {}", self.config.base_url);

        let paginator = Paginator::new(
            PaginatorConfig::default().with_rows_per_page(self.config.page_size),
        );
        Ok(Controller::new(
            Box::new(api),
            Box::new(TerminalView::new(view_config)),
            paginator,
        ))
    }
}
