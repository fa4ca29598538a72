use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{
    ChatContext, ChatRequest, ChatResponse, Citation, DomainError, ServiceEndpoint,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const API_KEY_HEADER: &str = "api-key";

/// Azure OpenAI chat completions request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data_sources: Vec<ApiDataSource<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiDataSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: SearchParameters<'a>,
}

#[derive(Serialize)]
struct SearchParameters<'a> {
    endpoint: &'a str,
    index_name: &'a str,
    authentication: SearchAuthentication<'a>,
}

#[derive(Serialize)]
struct SearchAuthentication<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    key: &'a str,
}

/// Subset of the chat completions response we read.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    context: Option<ApiContext>,
}

#[derive(Deserialize)]
struct ApiContext {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    citations: Vec<ApiCitation>,
}

#[derive(Deserialize)]
struct ApiCitation {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Extract the service's error message from a JSON error body, if it has one.
pub(crate) fn service_error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
    Some(match parsed.error.code {
        Some(code) => format!("{} ({})", parsed.error.message, code),
        None => parsed.error.message,
    })
}

pub(crate) fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Build the deployment-scoped URL for an Azure OpenAI operation.
pub fn deployment_url(connection: &ServiceEndpoint, deployment: &str, operation: &str) -> String {
    format!(
        "{}/openai/deployments/{}/{}?api-version={}",
        connection.endpoint.trim_end_matches('/'),
        deployment,
        operation,
        connection.api_version
    )
}

/// HTTP client for the Azure OpenAI chat completions REST API.
///
/// One instance is meant to live for the whole process. Requests that carry
/// an [`crate::domain::AzureSearchSource`] are sent with an `azure_search`
/// data source so the service grounds its answer in that index; the returned
/// intent and citations are decoded into [`ChatContext`].
pub struct AzureOpenAiClient {
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
        }
    }

    fn build_payload(request: &ChatRequest) -> ApiRequest<'_> {
        let data_sources = request
            .data_source()
            .map(|source| ApiDataSource {
                kind: "azure_search",
                parameters: SearchParameters {
                    endpoint: &source.endpoint,
                    index_name: &source.index_name,
                    authentication: SearchAuthentication {
                        kind: "api_key",
                        key: &source.key,
                    },
                },
            })
            .into_iter()
            .collect();

        ApiRequest {
            messages: request
                .messages()
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: request.max_tokens(),
            temperature: request.temperature(),
            data_sources,
        }
    }

    fn decode(body: &str) -> Result<ChatResponse, DomainError> {
        let raw: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| DomainError::parse(format!("AzureOpenAiClient: invalid JSON response: {e}")))?;
        let api_response: ApiResponse = serde_json::from_value(raw.clone())
            .map_err(|e| DomainError::parse(format!("AzureOpenAiClient: unexpected response shape: {e}")))?;

        let message = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| DomainError::service("AzureOpenAiClient: response contained no choices"))?;

        let mut response = ChatResponse::new(message.content.unwrap_or_default()).with_raw(raw);
        if let Some(context) = message.context {
            response = response.with_context(ChatContext {
                intent: context.intent,
                citations: context
                    .citations
                    .into_iter()
                    .map(|c| Citation::new(c.title.unwrap_or_default(), c.url.unwrap_or_default()))
                    .collect(),
            });
        }
        Ok(response)
    }
}

impl Default for AzureOpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for AzureOpenAiClient {
    async fn complete(
        &self,
        connection: &ServiceEndpoint,
        request: &ChatRequest,
    ) -> Result<ChatResponse, DomainError> {
        let url = deployment_url(connection, request.deployment(), "chat/completions");
        debug!(
            "POST {} ({} messages, max_tokens={}, temperature={}, grounded={})",
            url,
            request.messages().len(),
            request.max_tokens(),
            request.temperature(),
            request.data_source().is_some()
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &connection.api_key)
            .json(&Self::build_payload(request))
            .send()
            .await
            .map_err(|e| DomainError::service(format!("AzureOpenAiClient: request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::service(format!("AzureOpenAiClient: failed to read response: {e}")))?;

        if !status.is_success() {
            warn!("AzureOpenAiClient: API returned {status}: {body}");
            return Err(DomainError::service(match service_error_message(&body) {
                Some(message) => format!("AzureOpenAiClient: API returned {status}: {message}"),
                None => format!("AzureOpenAiClient: API returned {status}"),
            }));
        }

        Self::decode(&body)
    }
}
