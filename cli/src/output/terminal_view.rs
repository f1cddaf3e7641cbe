//! Terminal implementation of the controller view

use super::formatters::TableFormatter;
use async_trait::async_trait;
use colored::Colorize;
use console::Term;
use dialoguer::Confirm;
use picam_core::controller::{ModalResponse, View, DELETE_ALL_MODAL, DELETE_MODAL};
use picam_core::error::{Result, ViewError};
use picam_core::pagination::Pagination;
use picam_core::DownloadedFile;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Terminal view configuration
#[derive(Debug, Clone)]
pub struct TerminalViewConfig {
    /// Where downloads are written
    pub download_dir: PathBuf,
    /// Answer every modal with "yes" instead of prompting
    pub assume_yes: bool,
    /// Clear the screen before each render
    pub clear_on_render: bool,
    pub color: bool,
}

impl TerminalViewConfig {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            download_dir,
            assume_yes: false,
            clear_on_render: false,
            color: console::colors_enabled(),
        }
    }
}

/// View that prints to the terminal and prompts with dialoguer
pub struct TerminalView {
    config: TerminalViewConfig,
    formatter: TableFormatter,
}

impl TerminalView {
    pub fn new(config: TerminalViewConfig) -> Self {
        let formatter = TableFormatter::new(config.color);
        Self { config, formatter }
    }

    fn prompt_for(id: &str) -> Option<&'static str> {
        match id {
            DELETE_MODAL => Some("Delete the selected picture?"),
            DELETE_ALL_MODAL => Some("Delete ALL pictures stored on the camera?"),
            _ => None,
        }
    }
}

#[async_trait]
impl View for TerminalView {
    async fn show_modal(&self, id: &str) -> Result<ModalResponse> {
        let prompt = Self::prompt_for(id).ok_or_else(|| ViewError::UnknownModal {
            id: id.to_string(),
        })?;

        if self.config.assume_yes {
            debug!("Modal {} auto-confirmed", id);
            return Ok(ModalResponse::Confirmed);
        }

        let confirmed = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await
        .map_err(|e| ViewError::Prompt {
            message: e.to_string(),
        })?
        .map_err(|e| ViewError::Prompt {
            message: e.to_string(),
        })?;

        Ok(if confirmed {
            ModalResponse::Confirmed
        } else {
            ModalResponse::Dismissed
        })
    }

    async fn render(&self, pagination: &Pagination) -> Result<()> {
        if self.config.clear_on_render {
            Term::stdout().clear_screen()?;
        }
        println!("{}", self.formatter.format(pagination));
        Ok(())
    }

    async fn save_download(&self, file: &DownloadedFile) -> Result<PathBuf> {
        let save_failed = |e: std::io::Error| ViewError::SaveFailed {
            name: file.name.clone(),
            message: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.config.download_dir)
            .await
            .map_err(save_failed)?;
        let path = unique_path(&self.config.download_dir, &file.name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(save_failed)?;

        debug!("Wrote {} bytes to {}", file.len(), path.display());
        Ok(path)
    }

    fn show_error(&self, message: &str) {
        show_error(&message);
    }
}

/// Print an error banner to stderr
pub fn show_error(error: &dyn std::fmt::Display) {
    if console::colors_enabled_stderr() {
        eprintln!("{} {}", " ERROR ".on_red().white().bold(), error);
    } else {
        eprintln!("ERROR: {}", error);
    }
}

/// `dir/name`, or `dir/stem (n).ext` for the first n that does not exist yet
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let name_path = Path::new(name);
    let stem = name_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let extension = name_path.extension().and_then(|s| s.to_str());

    (1..)
        .map(|n| match extension {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
