//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
    /// Exact number of calls the endpoint must receive
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
            expected_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }
}

/// Message object as returned by the Bot API
pub fn message_json(message_id: i32, chat_id: i64, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": {
            "id": chat_id,
            "first_name": "Operator",
            "type": "private"
        },
        "date": 1640995200,
        "text": text
    })
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot that sends every request to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    async fn mount(&self, endpoint: &str, config: MockResponseConfig, result: Value, error: &str) {
        let response_body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({ "ok": true, "result": result })
            } else {
                json!({ "ok": false, "error_code": 400, "description": error })
            }
        });

        let mut response = ResponseTemplate::new(if config.success { 200 } else { 400 })
            .set_body_json(response_body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("POST"))
            .and(path_regex(format!("^/bot{}/(?i:{})$", test_bot_token(), endpoint)))
            .respond_with(response);
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }

        mock.mount(&self.server).await;
    }

    /// Setup mock for sendMessage endpoint; the sent message gets `message_id`
    pub async fn mock_send_message(&self, config: MockResponseConfig, message_id: i32) {
        let result = message_json(message_id, test_chat_id(), "Test message");
        self.mount("sendMessage", config, result, "Bad Request: message text is empty").await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self, config: MockResponseConfig) {
        let result = message_json(panel_message_id(), test_chat_id(), "Edited test message");
        self.mount("editMessageText", config, result, "Bad Request: message not found").await;
    }

    /// Setup mock for deleteMessage endpoint
    pub async fn mock_delete_message(&self, config: MockResponseConfig) {
        self.mount("deleteMessage", config, json!(true), "Bad Request: message to delete not found").await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self, config: MockResponseConfig) {
        self.mount("answerCallbackQuery", config, json!(true), "Bad Request: query is too old").await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        let config = MockResponseConfig::default();

        self.mock_send_message(config.clone(), prompt_message_id()).await;
        self.mock_edit_message_text(config.clone()).await;
        self.mock_delete_message(config.clone()).await;
        self.mock_answer_callback_query(config).await;
    }

    /// JSON bodies of all requests sent to an endpoint, in order
    pub async fn requests_to(&self, endpoint: &str) -> Vec<Value> {
        let received_requests = self.server.received_requests().await.unwrap_or_default();
        received_requests
            .iter()
            .filter(|req| {
                req.url
                    .path()
                    .to_ascii_lowercase()
                    .ends_with(&format!("/{}", endpoint.to_ascii_lowercase()))
            })
            .map(|req| req.body_json::<Value>().expect("json request body"))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let matching_requests = self.requests_to(endpoint).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Helper function to create test chat ID
pub fn test_chat_id() -> i64 {
    100
}

/// Helper function to create test admin user ID
pub fn test_admin_id() -> i64 {
    987654321
}

/// Message id the mock assigns to prompts
pub fn prompt_message_id() -> i32 {
    555
}

/// Message id of the panel the test buttons are attached to
pub fn panel_message_id() -> i32 {
    42
}
