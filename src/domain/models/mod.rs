mod chat;
mod image;
mod settings;

pub use chat::*;
pub use image::*;
pub use settings::*;
