mod basic_chat;
mod code_generation;
mod image_generation;
mod own_data;
mod prompt_engineering;
mod session;

pub use basic_chat::*;
pub use code_generation::*;
pub use image_generation::*;
pub use own_data::*;
pub use prompt_engineering::*;
pub use session::QuitMatch;
pub use session::QUIT_SENTINEL;
