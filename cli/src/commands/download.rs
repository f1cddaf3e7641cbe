//! Picture and archive download commands

use super::CommandContext;
use anyhow::Result;
use picam_core::PictureIndex;

/// Fetch one picture and save it into the download directory
pub async fn get_command(ctx: &CommandContext, index: PictureIndex, download: bool) -> Result<()> {
    let controller = ctx.controller()?;
    let path = controller.fetch_picture(index, download).await?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Fetch the zip archive of every picture
pub async fn download_all_command(ctx: &CommandContext) -> Result<()> {
    let controller = ctx.controller()?;
    let path = controller.download_all().await?;
    println!("📦 Saved {}", path.display());
    Ok(())
}
