//! Bot binary for pdf2doc-bot.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, wires up the stats store, and runs the Telegram
//! dispatcher.

use anyhow::Result;
use clap::Parser;
use pdf2doc_bot::bot::{schema, BotDeps};
use pdf2doc_bot::{ConversionConfig, DownsaveMode, InMemoryStats};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pdf2doc-bot",
    version,
    about = "Telegram bot converting PDF documents to legacy Word (.doc) files"
)]
struct Cli {
    /// Telegram bot token (from @BotFather).
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Maximum accepted file size in bytes.
    #[arg(long, default_value_t = pdf2doc_bot::config::DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Legacy down-save behaviour: auto, require, or skip.
    #[arg(long, value_enum, default_value = "auto")]
    downsave: DownsaveArg,

    /// Timeout for the LibreOffice converter subprocess, in seconds.
    #[arg(long, default_value_t = 60)]
    soffice_timeout: u64,

    /// Insert "Page N" headers into the output document.
    #[arg(long)]
    page_headers: bool,

    /// Increase log verbosity (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DownsaveArg {
    Auto,
    Require,
    Skip,
}

impl From<DownsaveArg> for DownsaveMode {
    fn from(arg: DownsaveArg) -> Self {
        match arg {
            DownsaveArg::Auto => DownsaveMode::Auto,
            DownsaveArg::Require => DownsaveMode::Require,
            DownsaveArg::Skip => DownsaveMode::Skip,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pdf2doc_bot={default_level}"))),
        )
        .init();

    let config = Arc::new(
        ConversionConfig::builder()
            .max_file_size(cli.max_file_size)
            .downsave(cli.downsave.into())
            .soffice_timeout_secs(cli.soffice_timeout)
            .page_headers(cli.page_headers)
            .build(),
    );
    let deps = BotDeps {
        config,
        stats: Arc::new(InMemoryStats::new()),
    };

    tracing::info!("starting pdf2doc-bot");
    let bot = Bot::new(cli.token);

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .default_handler(|upd| async move {
            tracing::warn!(?upd, "unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
