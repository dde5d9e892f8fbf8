//! Start command handler

use teloxide::{prelude::*, types::{Message, ParseMode}};
use crate::handlers::{keyboards, views};
use crate::utils::errors::Result;

/// Handle /start and /menu commands
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, views::MAIN_MENU)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}
