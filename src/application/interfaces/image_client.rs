use async_trait::async_trait;

use crate::domain::{DomainError, ImageRequest, ImageResponse, ServiceEndpoint};

/// Requests image generation from a hosted image model deployment.
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn generate(
        &self,
        connection: &ServiceEndpoint,
        deployment: &str,
        request: &ImageRequest,
    ) -> Result<ImageResponse, DomainError>;
}
