//! Status command handler

use teloxide::{prelude::*, types::{Message, ParseMode}};
use crate::context::AppContext;
use crate::handlers::views;
use crate::utils::errors::Result;

/// Handle /status command
pub async fn handle_status(bot: Bot, msg: Message, ctx: &AppContext) -> Result<()> {
    let text = views::status(ctx.commands.len(), &ctx.states.stats());

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
