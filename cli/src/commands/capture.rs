//! Capture-and-download command

use super::CommandContext;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Take a picture, save it locally and show the refreshed table
pub async fn capture_command(ctx: &CommandContext) -> Result<()> {
    let mut controller = ctx.controller()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Capturing on {}", controller.base_url()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    // The table is rendered by the refresh, so the spinner must be gone first
    let result = controller.capture_and_download().await;
    spinner.finish_and_clear();

    let path = result?;
    info!("Picture saved to {}", path.display());
    println!("📷 Saved {}", path.display());
    Ok(())
}
