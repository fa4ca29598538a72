use std::sync::Arc;

use tracing::{debug, info};

use super::session::{is_blank, QuitMatch};
use crate::application::{ChatClient, Console};
use crate::domain::{ChatRequest, DomainError, Settings};

pub const HIKING_PERSONA: &str = "I am a hiking enthusiast named Forest who helps people discover hikes in their area. If no area is specified, I will default to near Rainier National Park. I will then provide three suggestions for nearby hikes that vary in length. I will also share an interesting fact about the local nature on the hikes when making a recommendation.";

const MAX_TOKENS: u32 = 400;
const TEMPERATURE: f32 = 0.7;

/// Interactive chat with a fixed persona.
///
/// Settings are validated once before the loop. A service failure is not
/// caught here: it ends the session and propagates to the caller.
pub struct BasicChatUseCase {
    client: Arc<dyn ChatClient>,
    settings: Settings,
}

impl BasicChatUseCase {
    pub fn new(client: Arc<dyn ChatClient>, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub async fn execute(&self, console: &mut dyn Console) -> Result<(), DomainError> {
        let openai = match self.settings.openai() {
            Ok(openai) => openai,
            Err(e) if e.is_configuration() => {
                console.write_line(&e.to_string())?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        loop {
            console.write_line("Enter your prompt text (or type 'quit' to exit): ")?;
            let Some(input) = console.read_line()? else {
                debug!("End of input, leaving chat");
                break;
            };

            if QuitMatch::Exact.matches(&input) {
                break;
            }

            if is_blank(&input) {
                console.write_line("Please enter a prompt.")?;
                continue;
            }

            console.write_line("\nSending request for summary to Azure OpenAI endpoint...\n\n")?;

            let request = ChatRequest::new(&openai.deployment)
                .with_system(HIKING_PERSONA)
                .with_user(input)
                .with_max_tokens(MAX_TOKENS)
                .with_temperature(TEMPERATURE);

            let response = self.client.complete(&openai.connection, &request).await?;
            info!("Received {} characters from {}", response.content().len(), openai.deployment);

            console.write_line(&format!("Response: {}\n", response.content()))?;
        }

        Ok(())
    }
}
