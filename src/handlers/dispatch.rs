//! Update routing
//!
//! Commands are matched before prompt answers, so a command typed while a
//! prompt is open runs as a command and leaves the prompt pending.

use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::{prelude::*, types::{CallbackQuery, Message, Update}};
use tracing::error;

use crate::context::AppContext;
use crate::handlers::{
    awaiting_input, handle_add_command, handle_callback_query, handle_command,
    handle_edit_notification_text, handle_edit_response_text, Command,
};
use crate::state::StateTag;
use crate::utils::errors::LotPilotError;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

/// Create the main update handler
pub fn create_handler() -> UpdateHandler<HandlerError> {
    dptree::entry()
        .inspect(|update: Update, ctx: Arc<AppContext>| ctx.logging.log_update(&update))
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Answers to control panel prompts
                    dptree::filter(|msg: Message, ctx: Arc<AppContext>| {
                        awaiting_input(&msg, &ctx, StateTag::AddCommand)
                    })
                    .endpoint(add_command),
                )
                .branch(
                    dptree::filter(|msg: Message, ctx: Arc<AppContext>| {
                        awaiting_input(&msg, &ctx, StateTag::EditResponseText)
                    })
                    .endpoint(edit_response_text),
                )
                .branch(
                    dptree::filter(|msg: Message, ctx: Arc<AppContext>| {
                        awaiting_input(&msg, &ctx, StateTag::EditNotificationText)
                    })
                    .endpoint(edit_notification_text),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

fn report(context: &str, e: LotPilotError) -> HandlerError {
    error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling {}", context);
    e.into()
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, ctx: Arc<AppContext>) -> HandlerResult {
    handle_command(bot, msg, cmd, ctx).await.map_err(|e| report("command", e))
}

async fn add_command(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> HandlerResult {
    handle_add_command(bot, msg, ctx).await.map_err(|e| report("new command", e))
}

async fn edit_response_text(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> HandlerResult {
    handle_edit_response_text(bot, msg, ctx).await.map_err(|e| report("response text", e))
}

async fn edit_notification_text(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> HandlerResult {
    handle_edit_notification_text(bot, msg, ctx).await.map_err(|e| report("notification text", e))
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, ctx: Arc<AppContext>) -> HandlerResult {
    handle_callback_query(bot, query, ctx).await.map_err(|e| report("callback query", e))
}
