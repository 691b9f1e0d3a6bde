//! Mock negotiation backend for testing
//!
//! This module provides a mock HTTP server that simulates the negotiation
//! backend API. It uses wiremock to create configurable mock responses.

use std::time::Duration;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use Negotiator::config::{BackendConfig, ConversationConfig};
use Negotiator::{BackendClient, ChatController};

/// Mock negotiation backend server
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Value,
    /// Exact number of calls the mock must receive
    pub expected_calls: Option<u64>,
}

impl MockResponseConfig {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body,
            expected_calls: None,
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }
}

impl BackendMockServer {
    /// Create a new mock backend server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            api_url: self.uri(),
            ..BackendConfig::default()
        }
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(&self.backend_config()).expect("Failed to create backend client")
    }

    /// Controller wired to this server with pacing delays removed
    pub fn controller(&self) -> ChatController<BackendClient> {
        ChatController::new(self.client(), fast_conversation_config())
    }

    /// Setup mock for the negotiate endpoint
    pub async fn mock_negotiate(&self, config: MockResponseConfig) {
        self.mount("/api/negotiate", config).await;
    }

    /// Setup mock for the send endpoint
    pub async fn mock_send(&self, config: MockResponseConfig) {
        self.mount("/api/send", config).await;
    }

    async fn mount(&self, endpoint: &str, config: MockResponseConfig) {
        let mut response = ResponseTemplate::new(config.status).set_body_json(config.body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("POST")).and(path(endpoint)).respond_with(response);
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }

        mock.mount(&self.server).await;
    }

    /// JSON bodies received on an endpoint, in arrival order
    pub async fn received_bodies(&self, endpoint: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == endpoint)
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}

/// Conversation settings without artificial typing delays
pub fn fast_conversation_config() -> ConversationConfig {
    ConversationConfig {
        greeting_delay_ms: 0,
        acknowledge_delay_ms: 0,
        reset_delay_seconds: 1,
        ..ConversationConfig::default()
    }
}

/// Successful analysis body: suggested 400 with two competitor listings
pub fn negotiation_body() -> Value {
    json!({
        "message": "Hi! I'm interested in your iPhone 13. Would you consider $400?",
        "suggestedPrice": 400,
        "competitorPrices": [
            {"title": "Apple iPhone 13 128GB Midnight Unlocked Excellent Condition With Box", "price": 410},
            {"title": "iPhone 13 - Blue", "price": 395.5}
        ],
        "success": true
    })
}
