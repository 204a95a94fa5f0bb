//! Bot command handlers.
//!
//! The command set is a closed variant enum dispatched by teloxide's derive;
//! each variant maps to one reply. Handlers never touch the conversion
//! pipeline — documents arrive outside the command flow.

use super::BotDeps;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
    #[command(description = "about this bot")]
    About,
    #[command(description = "your conversion statistics")]
    Stats,
}

const START_TEXT: &str = "\
📄 PDF to DOC Converter

Send me a PDF file and I will convert it to a Microsoft Word document \
(.doc, Word 97-2003 compatible). Text and tables are extracted; images \
and scanned pages are not.

Commands:
/start — this message
/help — usage and limitations
/about — about this bot
/stats — your conversion statistics";

const HELP_TEXT: &str = "\
How to convert:
1. Send a PDF file (up to 20 MB)
2. Wait a moment while it is processed
3. Download the .doc file I send back

Supported:
• Text extraction, multi-page documents
• Simple tables (tab- or space-aligned)
• Unicode text

Limitations:
• Maximum file size: 20 MB
• Images are not preserved (text only)
• Scanned PDFs need OCR, which is not supported
• Complex layouts may be simplified";

const ABOUT_TEXT: &str = "\
PDF to DOC Converter Bot

Converts PDF files to Word 97-2003 (.doc) documents. Files are processed \
in memory and discarded after conversion; nothing is stored.";

pub async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    deps: BotDeps,
) -> anyhow::Result<()> {
    let text = match cmd {
        Command::Start => START_TEXT.to_string(),
        Command::Help => HELP_TEXT.to_string(),
        Command::About => ABOUT_TEXT.to_string(),
        Command::Stats => stats_text(&msg, &deps),
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

fn stats_text(msg: &Message, deps: &BotDeps) -> String {
    match msg.from() {
        Some(user) => {
            let count = deps.stats.get_count(user.id.0);
            format!(
                "📊 Your statistics\n\nSuccessful conversions: {count}\n\n\
                 Thanks for using the bot!"
            )
        }
        None => "Statistics are only available in direct chats.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_text() {
        let parse = |s| Command::parse(s, "pdf2doc_bot");
        assert_eq!(parse("/start").unwrap(), Command::Start);
        assert_eq!(parse("/help").unwrap(), Command::Help);
        assert_eq!(parse("/about").unwrap(), Command::About);
        assert_eq!(parse("/stats").unwrap(), Command::Stats);
        assert!(parse("/unknown").is_err());
    }
}
