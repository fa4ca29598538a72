use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ImageClient;
use crate::domain::{DomainError, ImageRequest, ImageResponse, ServiceEndpoint};

/// Deterministic [`ImageClient`] returning a fixed result.
pub struct MockImageClient {
    reply: Result<ImageResponse, String>,
    requests: Mutex<Vec<(String, ImageRequest)>>,
}

impl MockImageClient {
    pub fn returning(response: ImageResponse) -> Self {
        Self {
            reply: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Deployment name and request of every call, in order.
    pub fn requests(&self) -> Vec<(String, ImageRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn generate(
        &self,
        _connection: &ServiceEndpoint,
        deployment: &str,
        request: &ImageRequest,
    ) -> Result<ImageResponse, DomainError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((deployment.to_string(), request.clone()));

        self.reply.clone().map_err(DomainError::service)
    }
}
