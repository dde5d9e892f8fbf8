//! LotPilot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info};

use LotPilot::{
    config::Settings,
    context::AppContext,
    handlers::create_handler,
    state::StateTrackerManager,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", LotPilot::info());

    let ctx = Arc::new(AppContext::new(settings.clone())?);
    info!(
        commands = ctx.commands.len(),
        admins = ctx.auth.get_admin_ids().len(),
        "Auto-response commands loaded"
    );

    // Drop abandoned prompts in the background
    let mut state_manager = StateTrackerManager::new(ctx.states.clone(), settings.state.cleanup_interval());
    state_manager.start_cleanup();

    let bot = Bot::new(&settings.bot.token);

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![ctx])
        .default_handler(|upd| async move {
            debug!(update_id = upd.id.0, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    state_manager.stop_cleanup();
    info!("LotPilot bot has been shut down.");

    Ok(())
}
