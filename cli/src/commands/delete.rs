//! Delete commands

use super::CommandContext;
use anyhow::Result;
use picam_core::controller::DELETE_ALL_MODAL;
use picam_core::Controller;
use tracing::info;

/// Stage `index`, confirm and delete it
pub async fn delete_command(ctx: &CommandContext, index: u32) -> Result<()> {
    let mut controller = ctx.controller()?;
    delete_one(&mut controller, index).await
}

/// Confirm and delete every picture
pub async fn delete_all_command(ctx: &CommandContext) -> Result<()> {
    let mut controller = ctx.controller()?;
    delete_everything(&mut controller).await
}

pub(crate) async fn delete_one(controller: &mut Controller, index: u32) -> Result<()> {
    if controller.prepare_delete(index).await?.is_confirmed() {
        controller.confirm_delete().await?;
        println!("Deleted picture {}", index);
    } else {
        controller.cancel_delete();
        info!("Delete of picture {} cancelled", index);
    }
    Ok(())
}

pub(crate) async fn delete_everything(controller: &mut Controller) -> Result<()> {
    if controller.open_modal(DELETE_ALL_MODAL).await?.is_confirmed() {
        controller.delete_all().await?;
        println!("Deleted all pictures");
    } else {
        info!("Delete all cancelled");
    }
    Ok(())
}
