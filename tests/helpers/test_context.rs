//! Test context for unified test setup
//!
//! Wires an `AppContext` to a temporary command file and a mock Telegram
//! server, and feeds updates through the bot's update handler.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use teloxide::dptree;
use teloxide::types::{ChatId, Update, UserId};
use teloxide::Bot;

use LotPilot::config::Settings;
use LotPilot::context::AppContext;
use LotPilot::handlers::{create_handler, HandlerError};
use LotPilot::state::StateTracker;
use LotPilot::storage::{AutoResponseStore, CommandRepository};

use super::telegram_mock::{
    panel_message_id, test_admin_id, test_bot_token, test_chat_id, TelegramMockServer,
};
use super::test_data::{create_bot_me, create_callback_update, create_text_update};

pub type DispatchResult = std::result::Result<bool, HandlerError>;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Settings for a bot administered by `test_admin_id()`
pub fn create_test_settings(temp_dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = test_bot_token();
    settings.bot.admin_ids = vec![test_admin_id()];
    settings.auto_response.path = temp_dir
        .path()
        .join("configs")
        .join("auto_response.cfg")
        .to_string_lossy()
        .into_owned();
    settings
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub telegram: TelegramMockServer,
    pub bot: Bot,
    pub app: Arc<AppContext>,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Context with an empty command file
    pub async fn new() -> Self {
        Self::with_commands(&[]).await
    }

    /// Context whose command file already holds `sections`
    pub async fn with_commands(sections: &[&str]) -> Self {
        init_test_env();

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let settings = create_test_settings(&temp_dir);

        let mut store = AutoResponseStore::new();
        for section in sections {
            store.add_group(section).expect("valid test section");
        }
        let path = PathBuf::from(&settings.auto_response.path);
        store.save(&path).expect("save test commands");

        let commands = CommandRepository::open(&path).expect("open test commands");
        let app = AppContext::with_parts(settings, commands, StateTracker::new(None))
            .expect("test context");

        let telegram = TelegramMockServer::new().await;
        let bot = telegram.bot();

        Self {
            telegram,
            bot,
            app: Arc::new(app),
            temp_dir,
        }
    }

    pub fn chat_id(&self) -> ChatId {
        ChatId(test_chat_id())
    }

    pub fn admin_id(&self) -> UserId {
        UserId(test_admin_id() as u64)
    }

    pub fn commands_path(&self) -> PathBuf {
        PathBuf::from(&self.app.settings.auto_response.path)
    }

    /// Read the command file back from disk
    pub fn stored_commands(&self) -> AutoResponseStore {
        AutoResponseStore::load(&self.commands_path()).expect("load stored commands")
    }

    /// Run one update through the update handler.
    ///
    /// Returns false when no branch handled the update.
    pub async fn dispatch(&self, update: Update) -> DispatchResult {
        let deps = dptree::deps![self.bot.clone(), self.app.clone(), create_bot_me(), update];
        match create_handler().dispatch(deps).await {
            ControlFlow::Break(result) => result.map(|()| true),
            ControlFlow::Continue(_) => Ok(false),
        }
    }

    /// Press a panel button as `user_id`
    pub async fn press(&self, user_id: i64, data: &str) -> DispatchResult {
        self.dispatch(create_callback_update(user_id, data, panel_message_id())).await
    }

    /// Press a button attached to the message `message_id` as the admin
    pub async fn press_on(&self, message_id: i32, data: &str) -> DispatchResult {
        self.dispatch(create_callback_update(test_admin_id(), data, message_id)).await
    }

    /// Send a text message as `user_id`
    pub async fn send_as(&self, user_id: i64, message_id: i32, text: &str) -> DispatchResult {
        self.dispatch(create_text_update(message_id, user_id, text)).await
    }

    /// Send a text message as the admin.
    ///
    /// Returns false when neither a command nor a pending prompt claims the message.
    pub async fn send_text(&self, message_id: i32, text: &str) -> DispatchResult {
        self.send_as(test_admin_id(), message_id, text).await
    }
}
