//! Document upload handling: the bridge between Telegram and the pipeline.
//!
//! The declared size and file name are checked before anything is
//! downloaded — the platform reports both up front, so an oversized or
//! non-PDF upload is answered without fetching a byte. The full validation
//! runs again inside the pipeline; this pre-check only exists to fail fast.
//!
//! The conversion itself is synchronous and CPU-bound, so it runs inside
//! `tokio::task::spawn_blocking` to keep the dispatcher's worker threads
//! free while a file is being parsed.

use super::BotDeps;
use crate::convert;
use crate::error::ErrorKind;
use crate::model::RawInput;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, Document, InputFile};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// Handle a document upload: download, convert, reply.
pub async fn handle_document(
    bot: Bot,
    msg: Message,
    doc: Document,
    deps: BotDeps,
) -> anyhow::Result<()> {
    let file_name = doc
        .file_name
        .clone()
        .unwrap_or_else(|| "document".to_string());

    // Fast pre-checks on declared metadata, before any download.
    let declared_size = u64::from(doc.file.size);
    if declared_size > deps.config.max_file_size {
        bot.send_message(msg.chat.id, user_message(ErrorKind::TooLarge))
            .await?;
        return Ok(());
    }
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        bot.send_message(msg.chat.id, user_message(ErrorKind::UnsupportedType))
            .await?;
        return Ok(());
    }

    let status = bot
        .send_message(msg.chat.id, format!("⏳ Converting {file_name}…"))
        .await?;

    let bytes = match download_document(&bot, &doc).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "failed to download document");
            bot.edit_message_text(
                msg.chat.id,
                status.id,
                "❌ Could not download the file from Telegram. Please try again.",
            )
            .await?;
            return Ok(());
        }
    };

    let input = RawInput {
        bytes,
        file_name: file_name.clone(),
        size: declared_size,
    };
    let config = deps.config.clone();
    let result = tokio::task::spawn_blocking(move || convert::convert(&input, &config)).await?;

    match result {
        Ok(output) => {
            bot.send_chat_action(msg.chat.id, ChatAction::UploadDocument)
                .await?;
            let mut req = bot.send_document(
                msg.chat.id,
                InputFile::memory(output.bytes).file_name(output.file_name.clone()),
            );
            req.caption = Some(format!(
                "✅ Converted {file_name} — {} page(s), {} table(s)",
                output.stats.page_count, output.stats.table_blocks
            ));
            req.await?;
            bot.delete_message(msg.chat.id, status.id).await?;

            if let Some(user) = msg.from() {
                deps.stats.record_success(user.id.0);
            }
            info!(file_name = %file_name, "conversion delivered");
        }
        Err(e) => {
            warn!(file_name = %file_name, error = %e, "conversion failed");
            bot.edit_message_text(msg.chat.id, status.id, user_message(e.kind()))
                .await?;
        }
    }

    Ok(())
}

/// Prompt for anything that is not a command or a document.
pub async fn handle_other(bot: Bot, msg: Message) -> anyhow::Result<()> {
    bot.send_message(
        msg.chat.id,
        "📄 Send me a PDF file to convert it to Word. Use /help for details.",
    )
    .await?;
    Ok(())
}

/// Fetch the document bytes through the bot API.
///
/// Telegram only serves file content through a server-side path, so the
/// bytes go through a temp file that is removed when the handle drops.
async fn download_document(bot: &Bot, doc: &Document) -> anyhow::Result<Vec<u8>> {
    let file = bot.get_file(doc.file.id.clone()).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("upload.pdf");

    let mut dst = tokio::fs::File::create(&path).await?;
    bot.download_file(&file.path, &mut dst).await?;
    dst.flush().await?;
    drop(dst);

    Ok(tokio::fs::read(&path).await?)
}

/// Translate a failure category into the text shown to the user.
pub fn user_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::TooLarge => {
            "❌ File too large. The maximum supported size is 20 MB."
        }
        ErrorKind::UnsupportedType => {
            "❌ That is not a PDF file. Please send a file with a .pdf extension."
        }
        ErrorKind::Unreadable => {
            "❌ Could not read that PDF. It may be corrupted or encrypted."
        }
        ErrorKind::Empty => {
            "❌ No extractable text found. Scanned PDFs need OCR, which this bot does not support."
        }
        ErrorKind::WriteFailed => {
            "❌ Converting to Word failed on our side. Please try again later."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_kind_has_a_message() {
        for kind in [
            ErrorKind::TooLarge,
            ErrorKind::UnsupportedType,
            ErrorKind::Unreadable,
            ErrorKind::Empty,
            ErrorKind::WriteFailed,
        ] {
            assert!(!user_message(kind).is_empty());
        }
    }
}
