use std::sync::Arc;

use tracing::{debug, info};

use super::session::is_blank;
use crate::application::{ChatClient, Console};
use crate::domain::{AzureSearchSource, ChatRequest, ChatResponse, DomainError, Settings};

const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.9;

/// Single question answered from an Azure AI Search index.
///
/// Both the model and the search settings are validated before anything is
/// read from the console. A service failure propagates to the caller.
pub struct OwnDataUseCase {
    client: Arc<dyn ChatClient>,
    settings: Settings,
    show_citations: bool,
}

impl OwnDataUseCase {
    pub fn new(client: Arc<dyn ChatClient>, settings: Settings) -> Self {
        Self {
            client,
            settings,
            show_citations: false,
        }
    }

    pub fn with_citations(mut self, show: bool) -> Self {
        self.show_citations = show;
        self
    }

    pub async fn execute(
        &self,
        console: &mut dyn Console,
    ) -> Result<Option<ChatResponse>, DomainError> {
        let validated = self
            .settings
            .openai()
            .and_then(|openai| self.settings.search().map(|search| (openai, search)));
        let (openai, search) = match validated {
            Ok(pair) => pair,
            Err(e) if e.is_configuration() => {
                console.write_line(&e.to_string())?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        console.write_line("Enter a question:")?;
        let question = console.read_line()?.unwrap_or_default();
        if is_blank(&question) {
            console.write_line("Please enter a question.")?;
            return Ok(None);
        }

        console.write_line("...Sending the following request to Azure OpenAI endpoint...")?;
        console.write_line(&format!("Request: {}\n", question))?;

        debug!("Grounding on index {} at {}", search.index, search.endpoint);
        let request = ChatRequest::new(&openai.deployment)
            .with_user(question)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE)
            .with_data_source(AzureSearchSource::from(search));

        let response = self.client.complete(&openai.connection, &request).await?;
        info!("Answer carries {} citation(s)", response.citations().len());

        console.write_line(&format!("Response: {}\n", response.content()))?;
        console.write_line(&format!("  Intent: {}", response.intent().unwrap_or_default()))?;

        if self.show_citations {
            console.write_line("\n  Citations of data used:")?;
            for citation in response.citations() {
                console.write_line(&format!("    Citation: {} - {}", citation.title, citation.url))?;
            }
        }

        Ok(Some(response))
    }
}
