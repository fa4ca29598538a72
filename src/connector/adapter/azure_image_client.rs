use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::azure_openai_client::{build_http_client, deployment_url, service_error_message};
use crate::application::ImageClient;
use crate::domain::{DomainError, ImageRequest, ImageResponse, ServiceEndpoint};

/// Image generation is only offered on preview API versions.
pub const IMAGE_API_VERSION: &str = "2024-02-15-preview";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
    #[serde(default)]
    error: Option<ImageError>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    revised_prompt: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageError {
    message: String,
}

/// HTTP client for the Azure OpenAI image generations REST API.
pub struct AzureImageClient {
    client: reqwest::Client,
}

impl AzureImageClient {
    pub fn new() -> Self {
        Self {
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    fn decode(body: &str) -> Result<ImageResponse, DomainError> {
        let parsed: ImageGenerationResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::parse(format!("AzureImageClient: invalid response: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(DomainError::service(format!("AzureImageClient: {}", error.message)));
        }

        let image = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::service("AzureImageClient: response contained no images"))?;

        Ok(ImageResponse::new(image.revised_prompt, image.url))
    }
}

impl Default for AzureImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageClient for AzureImageClient {
    async fn generate(
        &self,
        connection: &ServiceEndpoint,
        deployment: &str,
        request: &ImageRequest,
    ) -> Result<ImageResponse, DomainError> {
        let connection = ServiceEndpoint {
            api_version: IMAGE_API_VERSION.to_string(),
            ..connection.clone()
        };
        let url = deployment_url(&connection, deployment, "images/generations");
        debug!("POST {} (n={}, size={})", url, request.n, request.size);

        let response = self
            .client
            .post(&url)
            .header("api-key", &connection.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::service(format!("AzureImageClient: request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::service(format!("AzureImageClient: failed to read response: {e}")))?;

        if !status.is_success() {
            warn!("AzureImageClient: API returned {status}: {body}");
            return Err(DomainError::service(match service_error_message(&body) {
                Some(message) => format!("AzureImageClient: API returned {status}: {message}"),
                None => format!("AzureImageClient: API returned {status}"),
            }));
        }

        Self::decode(&body)
    }
}
