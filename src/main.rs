mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aoai_labs::domain::DEFAULT_SETTINGS_FILE;
use aoai_labs::{
    AzureImageClient, AzureOpenAiClient, BasicChatUseCase, ChatClient, CodeGenerationUseCase,
    ImageGenerationUseCase, OwnDataUseCase, PromptEngineeringUseCase, SampleFiles, Settings,
    StdioConsole,
};

use crate::cli::Commands;

#[derive(Parser)]
#[command(name = "aoai-labs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON settings file with the Azure OpenAI and Azure AI Search values
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(&cli.config)?;
    debug!("Using settings from {}", settings.source());

    let mut console = StdioConsole::new();

    match cli.command {
        Commands::Chat => {
            let client: Arc<dyn ChatClient> = Arc::new(AzureOpenAiClient::new());
            BasicChatUseCase::new(client, settings)
                .execute(&mut console)
                .await?;
        }

        Commands::Prompt {
            system_file,
            full_response,
        } => {
            let client: Arc<dyn ChatClient> = Arc::new(AzureOpenAiClient::new());
            PromptEngineeringUseCase::new(client, settings)
                .with_system_file(system_file)
                .with_full_response(full_response)
                .execute(&mut console)
                .await?;
        }

        Commands::Codegen {
            function_file,
            go_fish_file,
            output,
            full_response,
        } => {
            let client: Arc<dyn ChatClient> = Arc::new(AzureOpenAiClient::new());
            CodeGenerationUseCase::new(client, settings)
                .with_samples(SampleFiles {
                    function: function_file,
                    go_fish: go_fish_file,
                })
                .with_output_file(output)
                .with_full_response(full_response)
                .execute(&mut console)
                .await?;
        }

        Commands::Image { deployment } => {
            // The HTTP client lives only for this one request
            let client = Arc::new(AzureImageClient::new());
            ImageGenerationUseCase::new(client, settings)
                .with_deployment(deployment)
                .execute(&mut console)
                .await?;
        }

        Commands::OwnData { citations } => {
            let client: Arc<dyn ChatClient> = Arc::new(AzureOpenAiClient::new());
            OwnDataUseCase::new(client, settings)
                .with_citations(citations)
                .execute(&mut console)
                .await?;
        }
    }

    Ok(())
}
