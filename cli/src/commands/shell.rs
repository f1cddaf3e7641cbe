//! Interactive shell over a single controller
//!
//! Keeps the table on screen and maps short typed commands to the same
//! gestures the one-shot subcommands use.

use super::delete::{delete_everything, delete_one};
use super::CommandContext;
use crate::output::show_error;
use anyhow::Result;
use dialoguer::Input;
use picam_core::{Controller, PictureIndex};
use tracing::debug;

const HELP: &str = "\
Commands:
  c, capture          take a picture and download it
  n, next             next page
  p, prev             previous page
  page <N>            jump to page N
  get <INDEX|latest>  download one picture
  d, delete <INDEX>   delete one picture
  delete-all          delete every picture
  download-all        download a zip of every picture
  r, refresh          reload the table
  h, help             show this help
  q, quit             leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Capture,
    NextPage,
    PreviousPage,
    /// One-based page number
    Page(usize),
    Get(PictureIndex),
    Delete(u32),
    DeleteAll,
    DownloadAll,
    Refresh,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("Unexpected argument '{}'", extra));
        }

        let command = match (verb.to_lowercase().as_str(), argument) {
            ("c" | "capture", None) => ShellCommand::Capture,
            ("n" | "next", None) => ShellCommand::NextPage,
            ("p" | "prev" | "previous", None) => ShellCommand::PreviousPage,
            ("page", Some(n)) => match n.parse::<usize>() {
                Ok(page) if page > 0 => ShellCommand::Page(page),
                _ => return Err(format!("'{}' is not a page number", n)),
            },
            ("get", Some(index)) => ShellCommand::Get(index.parse()?),
            ("d" | "delete" | "rm", Some(index)) => match index.parse::<u32>() {
                Ok(index) => ShellCommand::Delete(index),
                Err(_) => return Err(format!("'{}' is not a picture index", index)),
            },
            ("delete-all", None) => ShellCommand::DeleteAll,
            ("download-all", None) => ShellCommand::DownloadAll,
            ("r" | "refresh", None) => ShellCommand::Refresh,
            ("h" | "help" | "?", None) => ShellCommand::Help,
            ("q" | "quit" | "exit", None) => ShellCommand::Quit,
            ("page" | "get" | "d" | "delete" | "rm", None) => {
                return Err(format!("'{}' needs an argument", verb))
            }
            (_, Some(_)) if Self::parse(verb).is_ok() => {
                return Err(format!("'{}' takes no argument", verb))
            }
            _ => return Err(format!("Unknown command '{}', type 'help'", verb)),
        };
        Ok(Some(command))
    }
}

/// Run the shell until `quit` or end of input
pub async fn shell_command(ctx: &CommandContext) -> Result<()> {
    let mut view_config = ctx.view_config();
    view_config.clear_on_render = true;
    let mut controller = ctx.controller_with_view(view_config)?;

    if let Err(e) = controller.setup().await {
        controller.report_error(&e);
    }
    println!("Type 'help' for commands");

    loop {
        let Some(line) = read_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                show_error(&message);
                continue;
            }
        };
        debug!("Shell command: {:?}", command);

        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut controller, command).await {
            controller.report_error(&format!("{:#}", e));
        }
    }

    Ok(())
}

async fn execute(controller: &mut Controller, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::Capture => {
            let path = controller.capture_and_download().await?;
            println!("📷 Saved {}", path.display());
        }
        ShellCommand::NextPage => controller.next_page().await?,
        ShellCommand::PreviousPage => controller.previous_page().await?,
        ShellCommand::Page(page) => controller.go_to_page(page - 1).await?,
        ShellCommand::Get(index) => {
            let path = controller.fetch_picture(index, true).await?;
            println!("Saved {}", path.display());
        }
        ShellCommand::Delete(index) => delete_one(controller, index).await?,
        ShellCommand::DeleteAll => delete_everything(controller).await?,
        ShellCommand::DownloadAll => {
            let path = controller.download_all().await?;
            println!("📦 Saved {}", path.display());
        }
        ShellCommand::Refresh => {
            controller.refresh().await?;
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }
    Ok(())
}

/// Prompt for one line; `None` once input is closed
async fn read_line() -> Result<Option<String>> {
    let read = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("picam")
            .allow_empty(true)
            .interact_text()
    })
    .await?;

    match read {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}
