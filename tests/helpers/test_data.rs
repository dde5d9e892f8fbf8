//! Test data helpers for creating test objects
//!
//! Telegram updates are built from Bot API JSON so they match what the
//! dispatcher receives.

use serde_json::json;
use teloxide::types::{CallbackQuery, Me, Message, Update, User, UserId};

use super::telegram_mock::{message_json, panel_message_id, test_chat_id};

/// Helper function to create a test Telegram user
pub fn create_test_user(user_id: i64, username: Option<&str>) -> User {
    User {
        id: UserId(user_id as u64),
        is_bot: false,
        first_name: "Operator".to_string(),
        last_name: None,
        username: username.map(|s| s.to_string()),
        language_code: None,
        is_premium: false,
        added_to_attachment_menu: false,
    }
}

fn user_json(user_id: i64) -> serde_json::Value {
    json!({
        "id": user_id,
        "is_bot": false,
        "first_name": "Operator",
        "username": "operator"
    })
}

fn text_message_json(message_id: i32, user_id: i64, text: &str) -> serde_json::Value {
    let mut message = message_json(message_id, test_chat_id(), text);
    message["from"] = user_json(user_id);
    message
}

fn callback_query_json(user_id: i64, data: &str, message_id: i32) -> serde_json::Value {
    json!({
        "id": "4382bfdwdsb323b2d9",
        "from": user_json(user_id),
        "chat_instance": "-8000000000000000000",
        "data": data,
        "message": message_json(message_id, test_chat_id(), "Panel")
    })
}

/// Text message sent by `user_id` in the test chat
pub fn create_text_message(message_id: i32, user_id: i64, text: &str) -> Message {
    serde_json::from_value(text_message_json(message_id, user_id, text)).expect("valid message json")
}

/// Button press by `user_id` on the test panel message
pub fn create_callback_query(user_id: i64, data: &str) -> CallbackQuery {
    create_callback_query_on(user_id, data, panel_message_id())
}

/// Button press by `user_id` on the message `message_id`
pub fn create_callback_query_on(user_id: i64, data: &str, message_id: i32) -> CallbackQuery {
    serde_json::from_value(callback_query_json(user_id, data, message_id)).expect("valid callback query json")
}

/// The bot itself, as returned by `getMe`
pub fn create_bot_me() -> Me {
    serde_json::from_value(json!({
        "id": 5000000001u64,
        "is_bot": true,
        "first_name": "LotPilot",
        "username": "lotpilot_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false
    }))
    .expect("valid bot json")
}

/// Update carrying a text message from `user_id`
pub fn create_text_update(message_id: i32, user_id: i64, text: &str) -> Update {
    let message = text_message_json(message_id, user_id, text);
    serde_json::from_str(&json!({ "update_id": 10_000 + message_id, "message": message }).to_string())
        .expect("valid update json")
}

/// Update carrying a button press by `user_id` on the message `message_id`
pub fn create_callback_update(user_id: i64, data: &str, message_id: i32) -> Update {
    let query = callback_query_json(user_id, data, message_id);
    serde_json::from_str(&json!({ "update_id": 20_000 + message_id, "callback_query": query }).to_string())
        .expect("valid update json")
}

/// Seller page with one lot category (two lots) and one currency category
pub const USER_PAGE_HTML: &str = r#"
<!DOCTYPE html>
<html><body>
<div class="mb20">
  <div class="offer">
    <div class="offer-list-title-container">
      <div class="offer-list-title">
        <h3><a href="https://funpay.com/lots/210/">Genshin Impact, Accounts</a></h3>
      </div>
    </div>
    <div class="tc table-hover table-clickable">
      <a href="https://funpay.com/lots/offer?id=1001" class="tc-item">
        <div class="tc-server hidden-xxs">Europe</div>
        <div class="tc-desc"><div class="tc-desc-text">AR 55 account, 10 five-star characters</div></div>
        <div class="tc-price" data-s="12.5"><div>12.5 <span class="unit">€</span></div></div>
      </a>
      <a href="https://funpay.com/lots/offer?id=1002" class="tc-item">
        <div class="tc-desc"><div class="tc-desc-text">Starter account</div></div>
        <div class="tc-price" data-s="3"><div>3 <span class="unit">€</span></div></div>
      </a>
    </div>
  </div>
  <div class="offer">
    <div class="offer-list-title-container">
      <div class="offer-list-title">
        <h3><a href="https://funpay.com/chips/125/">Black Desert Mobile, Silver</a></h3>
      </div>
    </div>
    <div class="tc table-hover table-clickable">
      <a href="https://funpay.com/chips/offer?id=2001" class="tc-item">
        <div class="tc-server">Asia</div>
        <div class="tc-desc-text">1kk silver</div>
        <div class="tc-price" data-s="0.4"><div>0.4 <span class="unit">€</span></div></div>
      </a>
    </div>
  </div>
</div>
</body></html>
"#;
