use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session::{is_blank, write_full_response, QuitMatch};
use crate::application::{ChatClient, Console};
use crate::domain::{ChatRequest, DomainError, Settings};

pub const DEFAULT_SYSTEM_FILE: &str = "system.txt";

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.7;

/// Interactive loop whose system message lives in a side file.
///
/// The file is re-read on every iteration so it can be edited while the
/// program waits at the pause banner. Configuration and service failures are
/// printed and the loop carries on.
pub struct PromptEngineeringUseCase {
    client: Arc<dyn ChatClient>,
    settings: Settings,
    system_file: PathBuf,
    show_full_response: bool,
}

impl PromptEngineeringUseCase {
    pub fn new(client: Arc<dyn ChatClient>, settings: Settings) -> Self {
        Self {
            client,
            settings,
            system_file: PathBuf::from(DEFAULT_SYSTEM_FILE),
            show_full_response: false,
        }
    }

    pub fn with_system_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_file = path.into();
        self
    }

    pub fn with_full_response(mut self, show: bool) -> Self {
        self.show_full_response = show;
        self
    }

    pub async fn execute(&self, console: &mut dyn Console) -> Result<(), DomainError> {
        loop {
            console.write_line(
                "-----------\nPausing the app to allow you to change the system prompt.\nPress any key to continue...",
            )?;
            console.pause()?;

            console.write_line(&format!(
                "\nUsing system message from {}",
                self.system_file.display()
            ))?;
            let system_message = match std::fs::read_to_string(&self.system_file) {
                Ok(text) => Some(text.trim().to_string()),
                Err(e) => {
                    warn!("Failed to read {}: {}", self.system_file.display(), e);
                    console.write_line(&format!(
                        "Unable to read {}: {}",
                        self.system_file.display(),
                        e
                    ))?;
                    None
                }
            };

            console.write_line("\nEnter user message or type 'quit' to exit:")?;
            let Some(user_message) = console.read_line()? else {
                debug!("End of input, leaving prompt session");
                break;
            };
            let user_message = user_message.trim();

            let quit_requested = QuitMatch::IgnoreCase.matches(user_message)
                || system_message
                    .as_deref()
                    .is_some_and(|s| QuitMatch::IgnoreCase.matches(s));
            if quit_requested {
                break;
            }

            let Some(system_message) = system_message else {
                continue;
            };

            if is_blank(&system_message) || is_blank(user_message) {
                console.write_line("Please enter a system and user message.")?;
                continue;
            }

            if let Err(e) = self.respond(console, &system_message, user_message).await {
                warn!("Prompt iteration failed: {}", e);
                console.write_line(&e.to_string())?;
            }
        }

        Ok(())
    }

    async fn respond(
        &self,
        console: &mut dyn Console,
        system_message: &str,
        user_message: &str,
    ) -> Result<(), DomainError> {
        console.write_line("\nSending prompt to Azure OpenAI endpoint...\n\n")?;

        let openai = self.settings.openai()?;

        let request = ChatRequest::new(&openai.deployment)
            .with_system(system_message)
            .with_user(user_message)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = self.client.complete(&openai.connection, &request).await?;
        info!("Received {} characters from {}", response.content().len(), openai.deployment);

        if self.show_full_response {
            write_full_response(console, &response)?;
        }

        console.write_line(&format!("\nResponse:\n{}\n\n", response.content()))?;
        Ok(())
    }
}
