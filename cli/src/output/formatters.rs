//! Formatting utilities for the file table

use colored::Colorize;
use picam_core::pagination::{BoxMode, Pagination};

/// Renders a pagination as terminal text
pub struct TableFormatter {
    color: bool,
}

impl TableFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Full table: header, rows of the active page, control box
    pub fn format(&self, pagination: &Pagination) -> String {
        let mut lines = Vec::new();

        if pagination.row_count() == 0 {
            lines.push(self.dim("No pictures stored on the camera"));
            return lines.join("\n");
        }

        lines.push(self.dim(&format!("{:>6}  {}", "#", "Picture")));

        let offset = pagination.active_offset();
        let highlight = pagination.highlight();
        for (i, row) in pagination.active_rows().iter().enumerate() {
            let position = offset + i;
            let highlighted = highlight.filter(|h| h.row == position);
            let line = match highlighted {
                Some(h) => format!(
                    "{}  {}",
                    self.styled(&format!("*{:>5}", row.index), &h.row_class),
                    self.styled(&row.name, &h.link_class)
                ),
                None => format!("{:>6}  {}", row.index, row.name),
            };
            lines.push(line);
        }

        let controls = self.format_controls(pagination);
        if !controls.is_empty() {
            lines.push(String::new());
            lines.push(controls);
        }

        lines.join("\n")
    }

    /// Page controls, the active one bracketed
    pub fn format_controls(&self, pagination: &Pagination) -> String {
        let control_box = pagination.control_box();
        if control_box.controls.len() <= 1 && control_box.mode == BoxMode::List {
            return String::new();
        }

        control_box
            .controls
            .iter()
            .map(|control| match &control.class {
                Some(class) => self.styled(&format!("[{}]", control.label), class),
                None => format!(" {} ", control.label),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn styled(&self, text: &str, class: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match class {
            "bg-primary" => text.on_blue().to_string(),
            "text-light" => text.bright_white().bold().to_string(),
            "active" => text.bold().reversed().to_string(),
            _ => text.to_string(),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picam_core::pagination::Paginator;
    use picam_core::FileEntry;

    fn pagination(count: u32, page: usize) -> Pagination {
        let rows = (1..=count)
            .rev()
            .map(|i| FileEntry::new(i, format!("Picamip_{:04}.jpg", i)))
            .collect();
        Paginator::default().paginate(rows, page)
    }

    #[test]
    fn test_empty_table() {
        let text = TableFormatter::new(false).format(&pagination(0, 0));
        assert_eq!(text, "No pictures stored on the camera");
    }

    #[test]
    fn test_first_row_marked() {
        let text = TableFormatter::new(false).format(&pagination(3, 0));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "*    3  Picamip_0003.jpg");
        assert_eq!(lines[2], "     2  Picamip_0002.jpg");
        // A single page shows no controls
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_second_page_has_no_marker_and_active_control() {
        let text = TableFormatter::new(false).format(&pagination(12, 1));
        assert!(!text.contains('*'));
        assert!(text.contains("Picamip_0001.jpg"));
        assert!(text.ends_with(" 1  [2]"));
    }
}
