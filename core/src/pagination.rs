//! Pagination of the stored-picture table
//!
//! The paginator groups file rows into fixed-size pages, builds the page
//! control box and marks the first row of the table (the most recent
//! picture) with highlight classes.

use crate::api::FileEntry;
use serde::{Deserialize, Serialize};

/// How page controls are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxMode {
    /// One control per page
    List,
    /// Previous / position / next
    Buttons,
}

/// Classes applied to the first row of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Applied to every cell of the row
    pub row_class: String,
    /// Applied to the link inside the row
    pub link_class: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            row_class: "bg-primary".to_string(),
            link_class: "text-light".to_string(),
        }
    }
}

/// Paginator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    pub rows_per_page: usize,
    /// Whether page-size controls are offered
    pub page_options: bool,
    /// Class tagging the active page control
    pub active_class: String,
    pub box_mode: BoxMode,
    /// Class tagging the control box itself
    pub box_class: String,
    pub highlight: Highlight,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            rows_per_page: crate::config::DEFAULT_PAGE_SIZE,
            page_options: false,
            active_class: "active".to_string(),
            box_mode: BoxMode::List,
            box_class: "pagination".to_string(),
            highlight: Highlight::default(),
        }
    }
}

impl PaginatorConfig {
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    pub fn with_box_mode(mut self, box_mode: BoxMode) -> Self {
        self.box_mode = box_mode;
        self
    }
}

/// A single page control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub label: String,
    /// Zero-based page this control navigates to
    pub target: usize,
    /// `active_class` when this control represents the active page
    pub class: Option<String>,
}

impl PageControl {
    pub fn is_active(&self) -> bool {
        self.class.is_some()
    }
}

/// The control box placed next to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBox {
    pub class: String,
    pub mode: BoxMode,
    pub page_options: bool,
    pub controls: Vec<PageControl>,
}

/// Highlight applied to one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHighlight {
    /// Position of the row in the table
    pub row: usize,
    pub row_class: String,
    pub link_class: String,
}

/// Splits rows into pages
#[derive(Debug, Clone)]
pub struct Paginator {
    config: PaginatorConfig,
}

impl Paginator {
    /// Create a paginator; a zero page size is treated as one row per page
    pub fn new(mut config: PaginatorConfig) -> Self {
        config.rows_per_page = config.rows_per_page.max(1);
        Self { config }
    }

    /// Paginate rows, starting on `active_page` (clamped to the last page)
    pub fn paginate(&self, rows: Vec<FileEntry>, active_page: usize) -> Pagination {
        let highlight = if rows.is_empty() {
            None
        } else {
            Some(RowHighlight {
                row: 0,
                row_class: self.config.highlight.row_class.clone(),
                link_class: self.config.highlight.link_class.clone(),
            })
        };

        let mut pagination = Pagination {
            config: self.config.clone(),
            rows,
            active_page: 0,
            highlight,
            control_box: ControlBox {
                class: self.config.box_class.clone(),
                mode: self.config.box_mode,
                page_options: self.config.page_options,
                controls: Vec::new(),
            },
        };
        pagination.set_active_page(active_page);
        pagination
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginatorConfig::default())
    }
}

/// Rows grouped into pages with their controls
#[derive(Debug, Clone)]
pub struct Pagination {
    config: PaginatorConfig,
    rows: Vec<FileEntry>,
    active_page: usize,
    highlight: Option<RowHighlight>,
    control_box: ControlBox,
}

impl Pagination {
    pub fn rows(&self) -> &[FileEntry] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.config.rows_per_page)
    }

    /// Zero-based active page
    pub fn active_page(&self) -> usize {
        self.active_page
    }

    /// Rows of a page, empty when the page does not exist
    pub fn page(&self, page: usize) -> &[FileEntry] {
        let start = page.saturating_mul(self.config.rows_per_page);
        if start >= self.rows.len() {
            return &[];
        }
        let end = (start + self.config.rows_per_page).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn active_rows(&self) -> &[FileEntry] {
        self.page(self.active_page)
    }

    /// Table position of the first row on the active page
    pub fn active_offset(&self) -> usize {
        self.active_page * self.config.rows_per_page
    }

    pub fn highlight(&self) -> Option<&RowHighlight> {
        self.highlight.as_ref()
    }

    pub fn control_box(&self) -> &ControlBox {
        &self.control_box
    }

    /// Switch pages; out of range requests clamp to the last page
    pub fn set_active_page(&mut self, page: usize) {
        let last = self.page_count().saturating_sub(1);
        self.active_page = page.min(last);
        self.control_box.controls = self.build_controls();
    }

    pub fn next_page(&mut self) {
        self.set_active_page(self.active_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_active_page(self.active_page.saturating_sub(1));
    }

    fn build_controls(&self) -> Vec<PageControl> {
        let pages = self.page_count();
        if pages == 0 {
            return Vec::new();
        }

        let active = Some(self.config.active_class.clone());
        match self.config.box_mode {
            BoxMode::List => (0..pages)
                .map(|page| PageControl {
                    label: (page + 1).to_string(),
                    target: page,
                    class: if page == self.active_page {
                        active.clone()
                    } else {
                        None
                    },
                })
                .collect(),
            BoxMode::Buttons => vec![
                PageControl {
                    label: "‹".to_string(),
                    target: self.active_page.saturating_sub(1),
                    class: None,
                },
                PageControl {
                    label: format!("{} / {}", self.active_page + 1, pages),
                    target: self.active_page,
                    class: active,
                },
                PageControl {
                    label: "›".to_string(),
                    target: (self.active_page + 1).min(pages - 1),
                    class: None,
                },
            ],
        }
    }
}
