//! Lots command handler
//!
//! Fetches a seller's public profile and replies with a short summary.

use teloxide::{prelude::*, types::{Message, ParseMode}};
use tracing::info;
use crate::context::AppContext;
use crate::handlers::views;
use crate::utils::errors::Result;
use crate::utils::logging::log_api_error;

const USAGE: &str = "Usage: /lots &lt;user_id&gt;";

/// Handle /lots command
pub async fn handle_lots(bot: Bot, msg: Message, ctx: &AppContext, args: &str) -> Result<()> {
    let Ok(user_id) = args.trim().parse::<u64>() else {
        bot.send_message(msg.chat.id, USAGE)
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    };

    info!(chat_id = msg.chat.id.0, marketplace_user_id = user_id, "Fetching user lots");

    let tracker = ctx.logging.create_performance_span("fetch_user_lots_info");
    let result = ctx
        .marketplace
        .fetch_user_lots_info(user_id, true, ctx.marketplace.default_timeout())
        .await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }

    let text = match result {
        Ok(info) => views::lots_summary(user_id, &info),
        Err(e) => {
            log_api_error("marketplace", &e.to_string(), Some(&format!("user_id={}", user_id)));
            views::scraper_error(&e)
        }
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
