//! Telegram bot gateway.
//!
//! This module is the transport shell around the conversion library:
//! it receives updates, fetches file bytes, invokes
//! [`crate::convert::convert`] on a blocking worker, and maps results back
//! to chat messages. The handler tree is exposed as [`schema`] so the binary
//! and tests share the same dispatch wiring.
//!
//! - [`commands`]  — `/start`, `/help`, `/about`, `/stats`
//! - [`documents`] — document uploads and the fallback for everything else

pub mod commands;
pub mod documents;

use crate::config::ConversionConfig;
use crate::stats::StatsStore;
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

/// Shared handler dependencies, injected once at startup.
#[derive(Clone)]
pub struct BotDeps {
    pub config: Arc<ConversionConfig>,
    pub stats: Arc<dyn StatsStore>,
}

/// Build the dispatcher handler tree.
///
/// Branch order matters: commands are plain text messages, so the command
/// branch must run before the text fallback; document uploads are matched
/// by payload, not by text.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry().branch(
        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<commands::Command>()
                    .endpoint(commands::answer),
            )
            .branch(
                dptree::filter_map(|msg: Message| msg.document().cloned())
                    .endpoint(documents::handle_document),
            )
            .branch(dptree::endpoint(documents::handle_other)),
    )
}
