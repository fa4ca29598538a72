mod azure_image_client;
mod azure_openai_client;
mod mock_chat_client;
mod mock_image_client;
mod scripted_console;
mod stdio_console;

pub use azure_image_client::*;
pub use azure_openai_client::{deployment_url, AzureOpenAiClient};
pub use mock_chat_client::*;
pub use mock_image_client::*;
pub use scripted_console::*;
pub use stdio_console::*;
