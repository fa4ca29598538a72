use std::sync::Arc;

use tracing::{info, warn};

use super::session::is_blank;
use crate::application::{Console, ImageClient};
use crate::domain::{DomainError, ImageRequest, ImageResponse, Settings};

pub const DEFAULT_IMAGE_DEPLOYMENT: &str = "dalle3";

/// Single image generation request. Every failure is reported on the console
/// and the run ends normally.
pub struct ImageGenerationUseCase {
    client: Arc<dyn ImageClient>,
    settings: Settings,
    deployment: String,
}

impl ImageGenerationUseCase {
    pub fn new(client: Arc<dyn ImageClient>, settings: Settings) -> Self {
        Self {
            client,
            settings,
            deployment: DEFAULT_IMAGE_DEPLOYMENT.to_string(),
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Returns the generated image when the request succeeded.
    pub async fn execute(
        &self,
        console: &mut dyn Console,
    ) -> Result<Option<ImageResponse>, DomainError> {
        console.write_line("Enter a prompt to request an image:")?;
        let prompt = console.read_line()?.unwrap_or_default();

        if is_blank(&prompt) {
            console.write_line("Please enter a prompt.")?;
            return Ok(None);
        }

        match self.generate(&prompt).await {
            Ok(image) => {
                if let Some(revised) = image.revised_prompt.as_deref() {
                    console.write_line(&format!("Revised prompt: {}", revised))?;
                }
                match image.display_url() {
                    Some(url) => console.write_line(&format!("Image URL: {}", url))?,
                    None => console.write_line("The service did not return an image URL.")?,
                }
                Ok(Some(image))
            }
            Err(e) => {
                warn!("Image generation failed: {}", e);
                console.write_line(&e.to_string())?;
                Ok(None)
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<ImageResponse, DomainError> {
        let connection = self.settings.image_endpoint()?;
        let request = ImageRequest::new(prompt);
        info!("Requesting {} image(s) of size {} from {}", request.n, request.size, self.deployment);
        self.client
            .generate(&connection, &self.deployment, &request)
            .await
    }
}
