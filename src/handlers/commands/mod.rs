//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod help;
pub mod lots;
pub mod start;
pub mod status;

use std::sync::Arc;
use teloxide::{prelude::*, types::Message, utils::command::BotCommands};
use crate::context::AppContext;
use crate::handlers::views;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "LotPilot commands:")]
pub enum Command {
    #[command(description = "Open the control panel")]
    Start,
    #[command(description = "Open the control panel")]
    Menu,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Summarize a seller's public lots")]
    Lots(String),
    #[command(description = "Show command and prompt counts (admin only)")]
    Status,
}

impl Command {
    /// Commands anyone may use
    pub fn is_public(&self) -> bool {
        matches!(self, Command::Help)
    }
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, ctx: Arc<AppContext>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    ctx.logging.log_command(user, &format!("{:?}", cmd), &[]);

    if !cmd.is_public() && ctx.auth.check_admin_auth(user).is_err() {
        bot.send_message(msg.chat.id, views::ACCESS_DENIED).await?;
        return Ok(());
    }

    match cmd {
        Command::Start | Command::Menu => start::handle_start(bot, msg).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Lots(args) => lots::handle_lots(bot, msg, &ctx, &args).await,
        Command::Status => status::handle_status(bot, msg, &ctx).await,
    }
}
