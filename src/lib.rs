pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    BasicChatUseCase, ChatClient, CodeGenerationUseCase, CodeTask, Console, ImageClient,
    ImageGenerationUseCase, OwnDataUseCase, PromptEngineeringUseCase, QuitMatch, SampleFiles,
};

pub use connector::{
    AzureImageClient, AzureOpenAiClient, MockChatClient, MockImageClient, ScriptedConsole,
    StdioConsole,
};

pub use domain::{
    AzureSearchSource, ChatContext, ChatMessage, ChatRequest, ChatResponse, ChatRole, Citation,
    DomainError, ImageRequest, ImageResponse, OpenAiSettings, SearchSettings, ServiceEndpoint,
    Settings,
};
