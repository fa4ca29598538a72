mod chat_client;
mod console;
mod image_client;

pub use chat_client::*;
pub use console::*;
pub use image_client::*;
