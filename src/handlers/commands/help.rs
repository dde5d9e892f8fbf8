//! Help command handler

use teloxide::{prelude::*, types::{Message, ParseMode}};
use crate::handlers::views;
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, views::HELP)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
