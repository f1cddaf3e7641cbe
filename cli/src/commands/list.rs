//! List command

use super::CommandContext;
use anyhow::Result;

/// Show one page of the stored-picture table
///
/// `page` is one-based as typed by the user; out of range pages clamp to the last one.
pub async fn list_command(ctx: &CommandContext, page: usize) -> Result<()> {
    let mut controller = ctx.controller()?;
    controller.setup_on_page(page.saturating_sub(1)).await?;
    Ok(())
}
