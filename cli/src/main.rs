//! # picam CLI
//!
//! Terminal client for the Raspberry Pi camera web service.
//!
//! ## Usage
//!
//! - `picam` - Show the stored-picture table
//! - `picam capture` - Take a picture and download it
//! - `picam delete 3` - Delete picture 3 after confirmation
//! - `picam shell` - Interactive mode

use anyhow::Result;
use clap::{Parser, Subcommand};
use picam_core::PictureIndex;
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    capture_command, delete_all_command, delete_command, download_all_command, get_command,
    list_command, shell_command, CommandContext,
};
use config::CliConfigLoader;
use output::show_error;

/// picam - capture, download and manage pictures on a Raspberry Pi camera
#[derive(Parser)]
#[command(name = "picam")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Capture, download and manage pictures on a Raspberry Pi camera")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Camera base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Rows per table page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Directory downloads are saved into
    #[arg(long, global = true)]
    download_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a picture and download it
    Capture,

    /// Show the stored-picture table
    List {
        /// Page to show, starting at 1
        #[arg(
            short,
            long,
            default_value_t = 1,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        page: usize,
    },

    /// Download one stored picture
    Get {
        /// Picture index, or `latest`
        #[arg(allow_negative_numbers = true)]
        index: PictureIndex,

        /// Ask the camera to send the picture as an attachment
        #[arg(long)]
        download: bool,
    },

    /// Delete one stored picture
    Delete {
        /// Picture index
        index: u32,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every stored picture
    DeleteAll {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Download a zip archive of every picture
    DownloadAll,

    /// Interactive shell
    Shell,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(download_dir) = &cli.download_dir {
        loader = loader.with_download_dir_override(download_dir.clone());
    }

    if let Some(page_size) = cli.page_size {
        loader = loader.with_page_size_override(page_size);
    }

    if let Some(timeout) = cli.timeout {
        loader = loader.with_timeout_override(timeout);
    }

    loader
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config_loader(&cli).load().await?;
    let ctx = CommandContext::new(config);

    match cli.command.unwrap_or(Commands::List { page: 1 }) {
        Commands::Capture => capture_command(&ctx).await,
        Commands::List { page } => list_command(&ctx, page).await,
        Commands::Get { index, download } => get_command(&ctx, index, download).await,
        Commands::Delete { index, yes } => {
            let ctx = ctx.with_assume_yes(yes);
            delete_command(&ctx, index).await
        }
        Commands::DeleteAll { yes } => {
            let ctx = ctx.with_assume_yes(yes);
            delete_all_command(&ctx).await
        }
        Commands::DownloadAll => download_all_command(&ctx).await,
        Commands::Shell => shell_command(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    if std::env::var_os("RUST_LOG").is_some() {
        picam_core::init_tracing();
    } else {
        picam_core::init_tracing_with_debug(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
