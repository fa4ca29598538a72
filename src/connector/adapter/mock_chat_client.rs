use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{ChatRequest, ChatResponse, DomainError, ServiceEndpoint};

enum MockReply {
    Respond(ChatResponse),
    Fail(String),
}

/// Deterministic [`ChatClient`] that answers every request the same way and
/// records what it was asked.
pub struct MockChatClient {
    reply: MockReply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    /// Answer with `content`, wrapped in a chat completions shaped raw body.
    pub fn replying(content: impl Into<String>) -> Self {
        let content = content.into();
        let raw = serde_json::json!({
            "object": "chat.completion",
            "model": "mock-chat",
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": content},
            }],
        });
        Self::with_response(ChatResponse::new(content).with_raw(raw))
    }

    pub fn with_response(response: ChatResponse) -> Self {
        Self {
            reply: MockReply::Respond(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(
        &self,
        connection: &ServiceEndpoint,
        request: &ChatRequest,
    ) -> Result<ChatResponse, DomainError> {
        debug!("MockChatClient: {} -> {}", connection.endpoint, request.deployment());
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match &self.reply {
            MockReply::Respond(response) => Ok(response.clone()),
            MockReply::Fail(message) => Err(DomainError::service(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> ServiceEndpoint {
        ServiceEndpoint {
            endpoint: "https://mock".into(),
            api_key: "k".into(),
            api_version: "v".into(),
        }
    }

    #[tokio::test]
    async fn replying_records_requests() {
        let client = MockChatClient::replying("Hi.");
        let request = ChatRequest::new("d").with_user("Hello");

        let response = client.complete(&connection(), &request).await.unwrap();

        assert_eq!(response.content(), "Hi.");
        assert_eq!(response.raw()["choices"][0]["message"]["content"], "Hi.");
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.requests()[0].user_prompt(), Some("Hello"));
    }

    #[tokio::test]
    async fn failing_returns_service_error() {
        let client = MockChatClient::failing("boom");
        let err = client
            .complete(&connection(), &ChatRequest::new("d"))
            .await
            .unwrap_err();
        assert!(err.is_service());
        assert_eq!(client.call_count(), 1);
    }
}
