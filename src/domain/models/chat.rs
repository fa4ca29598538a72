use serde::{Deserialize, Serialize};

use super::SearchSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }
}

/// An Azure AI Search index the service grounds its answer in.
#[derive(Clone, PartialEq, Eq)]
pub struct AzureSearchSource {
    pub endpoint: String,
    pub index_name: String,
    pub key: String,
}

impl From<SearchSettings> for AzureSearchSource {
    fn from(settings: SearchSettings) -> Self {
        Self {
            endpoint: settings.endpoint,
            index_name: settings.index,
            key: settings.key,
        }
    }
}

impl std::fmt::Debug for AzureSearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSearchSource")
            .field("endpoint", &self.endpoint)
            .field("index_name", &self.index_name)
            .finish_non_exhaustive()
    }
}

/// One chat completion call: ordered messages plus generation parameters.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    deployment: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    data_source: Option<AzureSearchSource>,
}

impl ChatRequest {
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
            messages: Vec::new(),
            max_tokens: 400,
            temperature: 0.7,
            data_source: None,
        }
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_system(self, content: impl Into<String>) -> Self {
        self.with_message(ChatMessage::system(content))
    }

    pub fn with_user(self, content: impl Into<String>) -> Self {
        self.with_message(ChatMessage::user(content))
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        // The service rejects a zero token budget
        self.max_tokens = max_tokens.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = if temperature.is_nan() {
            0.0
        } else {
            temperature.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_data_source(mut self, source: AzureSearchSource) -> Self {
        self.data_source = Some(source);
        self
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn data_source(&self) -> Option<&AzureSearchSource> {
        self.data_source.as_ref()
    }

    /// Content of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

impl Citation {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Retrieval metadata attached to an own-data answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub intent: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    content: String,
    context: Option<ChatContext>,
    raw: serde_json::Value,
}

impl ChatResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            context: None,
            raw: serde_json::Value::Null,
        }
    }

    pub fn with_context(mut self, context: ChatContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Keep the service's full response body for diagnostic dumps.
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn context(&self) -> Option<&ChatContext> {
        self.context.as_ref()
    }

    pub fn intent(&self) -> Option<&str> {
        self.context.as_ref().and_then(|c| c.intent.as_deref())
    }

    pub fn citations(&self) -> &[Citation] {
        self.context
            .as_ref()
            .map(|c| c.citations.as_slice())
            .unwrap_or_default()
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Pretty-printed structured form of the response.
    ///
    /// Uses the raw service body when one was kept, otherwise the decoded
    /// content and context.
    pub fn pretty_json(&self) -> String {
        let value = if self.raw.is_null() {
            serde_json::json!({
                "content": self.content,
                "context": self.context,
            })
        } else {
            self.raw.clone()
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_message_order() {
        let request = ChatRequest::new("gpt-35-turbo")
            .with_system("You are terse.")
            .with_user("Hello")
            .with_max_tokens(800)
            .with_temperature(0.7);

        assert_eq!(request.deployment(), "gpt-35-turbo");
        assert_eq!(request.messages().len(), 2);
        assert_eq!(request.messages()[0].role, ChatRole::System);
        assert_eq!(request.messages()[1].role, ChatRole::User);
        assert_eq!(request.user_prompt(), Some("Hello"));
        assert_eq!(request.max_tokens(), 800);
        assert!(request.data_source().is_none());
    }

    #[test]
    fn generation_parameters_are_kept_in_range() {
        let request = ChatRequest::new("d").with_max_tokens(0).with_temperature(1.5);
        assert_eq!(request.max_tokens(), 1);
        assert_eq!(request.temperature(), 1.0);

        let request = ChatRequest::new("d").with_temperature(-0.2);
        assert_eq!(request.temperature(), 0.0);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::system("x")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"x"}"#);
    }

    #[test]
    fn response_without_context_has_no_citations() {
        let response = ChatResponse::new("Try Mount Si.");
        assert_eq!(response.content(), "Try Mount Si.");
        assert!(response.intent().is_none());
        assert!(response.citations().is_empty());
    }

    #[test]
    fn pretty_json_falls_back_to_decoded_fields() {
        let response = ChatResponse::new("Hi.").with_context(ChatContext {
            intent: Some("greeting".into()),
            citations: vec![Citation::new("Doc", "http://x")],
        });
        let dump = response.pretty_json();
        assert!(dump.contains("\"Hi.\""));
        assert!(dump.contains("greeting"));
        assert!(dump.contains('\n'));
    }

    #[test]
    fn pretty_json_prefers_raw_body() {
        let raw = serde_json::json!({"id": "chatcmpl-1", "choices": []});
        let response = ChatResponse::new("Hi.").with_raw(raw);
        assert!(response.pretty_json().contains("chatcmpl-1"));
    }

    #[test]
    fn search_source_debug_hides_key() {
        let source = AzureSearchSource {
            endpoint: "https://s".into(),
            index_name: "idx".into(),
            key: "hidden".into(),
        };
        assert!(!format!("{:?}", source).contains("hidden"));
    }
}
